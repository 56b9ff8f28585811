//! Geometry for the dungeon tiles.
//!
//! Every tile type is drawn from the same unit cube. The cube is stored as six
//! separate quads (floor, roof and four walls) so that each tile type can pick
//! the faces it needs with its own index list.

use crawler_core::TileType;
use glam::{Vec2, Vec3};

use crate::abs::{Vertex, float_attrib};

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct TileVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl Vertex for TileVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            float_attrib::<TileVertex>(gl, 0, 3, 0);
            float_attrib::<TileVertex>(gl, 1, 2, std::mem::size_of::<Vec3>());
        }
    }
}

const fn v(x: f32, y: f32, z: f32, u: f32, w: f32) -> TileVertex {
    TileVertex {
        position: Vec3::new(x, y, z),
        uv: Vec2::new(u, w),
    }
}

/// The unit cube, four vertices per face.
pub const CUBE_VERTICES: [TileVertex; 24] = [
    // Floor
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    v(0.5, -0.5, -0.5, 0.0, 1.0),
    v(0.5, -0.5, 0.5, 1.0, 1.0),
    v(-0.5, -0.5, 0.5, 1.0, 0.0),
    // Roof
    v(-0.5, 0.5, -0.5, 0.0, 0.0),
    v(0.5, 0.5, -0.5, 0.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(-0.5, 0.5, 0.5, 1.0, 0.0),
    // Wall 0, on the -Z side
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
    v(0.5, 0.5, -0.5, 1.0, 1.0),
    v(0.5, -0.5, -0.5, 1.0, 0.0),
    // Wall 1, on the +X side
    v(0.5, -0.5, -0.5, 0.0, 0.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(0.5, 0.5, -0.5, 0.0, 1.0),
    // Wall 2, on the +Z side
    v(-0.5, -0.5, 0.5, 0.0, 0.0),
    v(-0.5, 0.5, 0.5, 0.0, 1.0),
    v(0.5, 0.5, 0.5, 1.0, 1.0),
    v(0.5, -0.5, 0.5, 1.0, 0.0),
    // Wall 3, on the -X side
    v(-0.5, -0.5, -0.5, 0.0, 0.0),
    v(-0.5, -0.5, 0.5, 1.0, 0.0),
    v(-0.5, 0.5, 0.5, 1.0, 1.0),
    v(-0.5, 0.5, -0.5, 0.0, 1.0),
];

/// Index of each face in [`CUBE_VERTICES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Face {
    Floor = 0,
    Roof = 1,
    Wall0 = 2,
    Wall1 = 3,
    Wall2 = 4,
    Wall3 = 5,
}

/// The two triangles of a face.
fn face_indices(face: Face) -> [u32; 6] {
    let base = face as u32 * 4;
    [base, base + 1, base + 3, base + 1, base + 2, base + 3]
}

/// The faces drawn for a tile type. Every tile has a floor and a roof.
pub fn tile_faces(tile: TileType) -> &'static [Face] {
    use Face::*;

    match tile {
        TileType::Open => &[Floor, Roof],
        TileType::Wall => &[Floor, Roof, Wall0],
        TileType::Corner => &[Floor, Roof, Wall0, Wall1],
        TileType::Hallway => &[Floor, Roof, Wall1, Wall3],
        TileType::DeadEnd => &[Floor, Roof, Wall1, Wall2, Wall3],
    }
}

/// The index list for a tile type.
pub fn tile_indices(tile: TileType) -> Vec<u32> {
    tile_faces(tile).iter().flat_map(|&f| face_indices(f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_count_per_tile() {
        let walls = |t| tile_indices(t).len() / 6 - 2;
        assert_eq!(walls(TileType::Open), 0);
        assert_eq!(walls(TileType::Wall), 1);
        assert_eq!(walls(TileType::Corner), 2);
        assert_eq!(walls(TileType::Hallway), 2);
        assert_eq!(walls(TileType::DeadEnd), 3);
    }

    #[test]
    fn test_indices_stay_inside_the_cube() {
        for tile in TileType::ALL {
            let indices = tile_indices(tile);
            assert_eq!(indices.len() % 3, 0);
            assert!(indices.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
        }
    }

    #[test]
    fn test_floor_indices() {
        assert_eq!(tile_indices(TileType::Open)[..6], [0, 1, 3, 1, 2, 3]);
        assert_eq!(face_indices(Face::Wall3), [20, 21, 23, 21, 22, 23]);
    }

    #[test]
    fn test_each_face_is_planar() {
        for face in 0..6 {
            let quad = &CUBE_VERTICES[face * 4..face * 4 + 4];
            let normal = (quad[1].position - quad[0].position)
                .cross(quad[3].position - quad[0].position);
            for vertex in quad {
                assert!((vertex.position - quad[0].position).dot(normal).abs() < 1e-6);
            }
        }
    }
}
