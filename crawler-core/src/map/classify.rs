//! Tile classification from neighbour adjacency.

use super::TileType;

/// Which of the four axis aligned neighbours of a cell are walkable.
///
/// North is `y + 1`, east is `x + 1`, south is `y - 1` and west is `x - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbours {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Neighbours {
    pub fn count(&self) -> usize {
        [self.north, self.east, self.south, self.west]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

/// Picks the tile type and rotation (in degrees) for a walkable cell.
///
/// Arms are checked top to bottom and the first match wins. Returns `None` for
/// a cell without any walkable neighbour, which then keeps its placeholder.
pub fn classify(n: Neighbours) -> Option<(TileType, u16)> {
    use TileType::*;

    let Neighbours {
        north,
        east,
        south,
        west,
    } = n;

    let tile = match (north, east, south, west) {
        (true, true, true, true) => (Open, 0),
        // Walls, named by the side that is closed off
        (true, true, true, false) => (Wall, 90),
        (true, false, true, true) => (Wall, 270),
        (true, true, false, true) => (Wall, 0),
        (false, true, true, true) => (Wall, 180),
        (true, true, false, false) => (Corner, 90),
        (false, true, true, false) => (Corner, 180),
        (false, false, true, true) => (Corner, 270),
        (true, false, false, true) => (Corner, 0),
        (true, false, true, false) => (Hallway, 0),
        (false, true, false, true) => (Hallway, 90),
        (true, false, false, false) => (DeadEnd, 180),
        (false, true, false, false) => (DeadEnd, 270),
        (false, false, true, false) => (DeadEnd, 0),
        (false, false, false, true) => (DeadEnd, 90),
        (false, false, false, false) => return None,
    };

    Some(tile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(north: bool, east: bool, south: bool, west: bool) -> Neighbours {
        Neighbours {
            north,
            east,
            south,
            west,
        }
    }

    #[test]
    fn test_classification_table() {
        use TileType::*;

        let table = [
            (n(true, true, true, true), Some((Open, 0))),
            (n(true, true, true, false), Some((Wall, 90))),
            (n(true, false, true, true), Some((Wall, 270))),
            (n(true, true, false, true), Some((Wall, 0))),
            (n(false, true, true, true), Some((Wall, 180))),
            (n(true, true, false, false), Some((Corner, 90))),
            (n(false, true, true, false), Some((Corner, 180))),
            (n(false, false, true, true), Some((Corner, 270))),
            (n(true, false, false, true), Some((Corner, 0))),
            (n(true, false, true, false), Some((Hallway, 0))),
            (n(false, true, false, true), Some((Hallway, 90))),
            (n(true, false, false, false), Some((DeadEnd, 180))),
            (n(false, true, false, false), Some((DeadEnd, 270))),
            (n(false, false, true, false), Some((DeadEnd, 0))),
            (n(false, false, false, true), Some((DeadEnd, 90))),
            (n(false, false, false, false), None),
        ];

        for (neighbours, expected) in table {
            assert_eq!(classify(neighbours), expected, "{neighbours:?}");
        }
    }

    #[test]
    fn test_every_pattern_has_a_right_angle_rotation() {
        for bits in 0u8..16 {
            let neighbours = n(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            if let Some((tile, rotation)) = classify(neighbours) {
                assert_eq!(rotation % 90, 0);
                assert!(rotation < 360);
                let expected = match neighbours.count() {
                    4 => TileType::Open,
                    3 => TileType::Wall,
                    1 => TileType::DeadEnd,
                    _ => tile,
                };
                assert_eq!(tile, expected);
            } else {
                assert_eq!(neighbours.count(), 0);
            }
        }
    }
}
