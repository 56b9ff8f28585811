//! The dungeon map: a fixed 20x20 grid of cells.
//!
//! The [`Grid`] owns all of its [`Cell`]s in a single flat buffer indexed by
//! `(x, y)`. A level load only flips the `is_path` flags and then runs the
//! classifier once over the whole grid, see [`Grid::classify`].

pub mod classify;

pub use classify::{Neighbours, classify};

/// Width of the map in cells.
pub const MAP_WIDTH: usize = 20;
/// Height of the map in cells.
pub const MAP_HEIGHT: usize = 20;

/// The shape of a tile, picked from which of its neighbours are walkable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TileType {
    #[default]
    Open,
    Wall,
    Corner,
    Hallway,
    DeadEnd,
}

impl TileType {
    pub const ALL: [TileType; 5] = [
        TileType::Open,
        TileType::Wall,
        TileType::Corner,
        TileType::Hallway,
        TileType::DeadEnd,
    ];
}

/// A single cell of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub is_path: bool,
    pub tile_type: TileType,
    /// Rotation around the up axis in degrees. Always one of 0, 90, 180 or 270.
    pub rotation: u16,
}

impl Cell {
    /// Creates a default, non-walkable cell at the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            is_path: false,
            tile_type: TileType::Open,
            rotation: 0,
        }
    }
}

/// The map grid.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates a grid where every cell is a default, non-walkable cell.
    pub fn new() -> Self {
        let mut cells = Vec::with_capacity(MAP_WIDTH * MAP_HEIGHT);
        for y in 0..MAP_HEIGHT {
            for x in 0..MAP_WIDTH {
                cells.push(Cell::new(x as i32, y as i32));
            }
        }
        Self { cells }
    }

    #[inline]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= MAP_WIDTH as i32 || y >= MAP_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * MAP_WIDTH + x as usize)
    }

    /// Resets every cell back to its default state.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::new(cell.x, cell.y);
        }
    }

    /// Gets the cell at the given coordinates, or `None` if it lies outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        Self::index(x, y).map(|i| &self.cells[i])
    }

    /// Gets a mutable reference to the cell at the given coordinates.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        Self::index(x, y).map(|i| &mut self.cells[i])
    }

    /// Returns `true` if the cell exists and is walkable.
    pub fn is_path(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|c| c.is_path)
    }

    /// Iterates over all cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterates over the walkable cells only.
    pub fn path_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_path)
    }

    /// Gathers the walkable state of the four axis aligned neighbours of a cell.
    pub fn neighbours(&self, x: i32, y: i32) -> Neighbours {
        Neighbours {
            north: self.is_path(x, y + 1),
            east: self.is_path(x + 1, y),
            south: self.is_path(x, y - 1),
            west: self.is_path(x - 1, y),
        }
    }

    /// Assigns a tile type and rotation to every walkable cell.
    ///
    /// The neighbour flags are read from the grid as a whole before anything is
    /// written, so the result only depends on the final set of path cells.
    pub fn classify(&mut self) {
        let tiles: Vec<_> = self
            .cells
            .iter()
            .map(|c| c.is_path.then(|| classify(self.neighbours(c.x, c.y))).flatten())
            .collect();

        for (cell, tile) in self.cells.iter_mut().zip(tiles) {
            if let Some((tile_type, rotation)) = tile {
                cell.tile_type = tile_type;
                cell.rotation = rotation;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(paths: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new();
        for &(x, y) in paths {
            grid.get_mut(x, y).unwrap().is_path = true;
        }
        grid.classify();
        grid
    }

    #[test]
    fn test_out_of_grid_lookups() {
        let grid = Grid::new();
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(0, -1).is_none());
        assert!(grid.get(MAP_WIDTH as i32, 0).is_none());
        assert!(grid.get(0, MAP_HEIGHT as i32).is_none());
        assert!(!grid.is_path(-1, -1));
        let cell = grid.get(3, 7).unwrap();
        assert_eq!((cell.x, cell.y), (3, 7));
    }

    #[test]
    fn test_fully_surrounded_cell_is_open() {
        let grid = grid_with(&[(5, 5), (5, 6), (6, 5), (5, 4), (4, 5)]);
        let cell = grid.get(5, 5).unwrap();
        assert_eq!(cell.tile_type, TileType::Open);
        assert_eq!(cell.rotation, 0);
    }

    #[test]
    fn test_horizontal_run_is_hallway() {
        let grid = grid_with(&[(0, 0), (1, 0), (2, 0)]);
        let middle = grid.get(1, 0).unwrap();
        assert_eq!(middle.tile_type, TileType::Hallway);
        assert_eq!(middle.rotation, 90);
        assert_eq!(grid.get(0, 0).unwrap().tile_type, TileType::DeadEnd);
        assert_eq!(grid.get(0, 0).unwrap().rotation, 270);
        assert_eq!(grid.get(2, 0).unwrap().rotation, 90);
    }

    #[test]
    fn test_dead_ends_face_their_only_neighbour() {
        let centre = (10, 10);
        let cases = [((10, 11), 180), ((11, 10), 270), ((10, 9), 0), ((9, 10), 90)];
        for (neighbour, rotation) in cases {
            let grid = grid_with(&[centre, neighbour]);
            let cell = grid.get(centre.0, centre.1).unwrap();
            assert_eq!(cell.tile_type, TileType::DeadEnd, "neighbour {neighbour:?}");
            assert_eq!(cell.rotation, rotation, "neighbour {neighbour:?}");
        }
    }

    #[test]
    fn test_isolated_path_cell_keeps_placeholder() {
        let grid = grid_with(&[(7, 7)]);
        let cell = grid.get(7, 7).unwrap();
        assert!(cell.is_path);
        assert_eq!(cell.tile_type, TileType::Open);
        assert_eq!(cell.rotation, 0);
    }

    #[test]
    fn test_non_path_cells_are_never_classified() {
        let grid = grid_with(&[(1, 1), (1, 2), (2, 1)]);
        let cell = grid.get(2, 2).unwrap();
        assert!(!cell.is_path);
        assert_eq!(cell.tile_type, TileType::Open);
        assert_eq!(cell.rotation, 0);
    }

    #[test]
    fn test_edge_of_grid_counts_as_wall() {
        // Top right corner: only west and south neighbours can ever exist.
        let (x, y) = (MAP_WIDTH as i32 - 1, MAP_HEIGHT as i32 - 1);
        let grid = grid_with(&[(x, y), (x - 1, y), (x, y - 1)]);
        let cell = grid.get(x, y).unwrap();
        assert_eq!(cell.tile_type, TileType::Corner);
        assert_eq!(cell.rotation, 270);
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut grid = grid_with(&[(0, 0), (0, 1)]);
        grid.clear();
        assert_eq!(grid.path_cells().count(), 0);
        assert!(grid.cells().all(|c| c.tile_type == TileType::Open && c.rotation == 0));
        assert_eq!(grid.get(4, 9).map(|c| (c.x, c.y)), Some((4, 9)));
    }
}
