//! Draws the dungeon grid.

use std::{collections::HashMap, sync::Arc};

use crawler_core::{Camera, Grid, TileType};
use glam::{Mat4, Vec3, Vec4};

use crate::{
    abs::{Mesh, ShaderProgram, Texture, Wrap},
    render::tiles::{CUBE_VERTICES, tile_indices},
    settings::Settings,
};

/// World transform of a tile at grid position `(x, y)` turned by `rotation` degrees.
pub fn tile_transform(x: i32, y: i32, rotation: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x as f32, 0.0, y as f32))
        * Mat4::from_rotation_y(rotation.to_radians())
}

/// Owns the GPU resources needed to draw a [`Grid`].
pub struct MapRenderer {
    meshes: HashMap<TileType, Mesh>,
    shader: ShaderProgram,
    wall_texture: Texture,
    color: Vec4,
}

impl MapRenderer {
    pub fn new(gl: &Arc<glow::Context>, settings: &Settings) -> Result<Self, String> {
        let mut meshes = HashMap::with_capacity(TileType::ALL.len());
        for tile in TileType::ALL {
            let mesh = Mesh::new(gl, &CUBE_VERTICES, &tile_indices(tile), glow::TRIANGLES)?;
            meshes.insert(tile, mesh);
        }

        let shader = ShaderProgram::from_files(
            gl,
            settings.asset("shaders/tile/vert.glsl"),
            settings.asset("shaders/tile/frag.glsl"),
        )?;

        let wall_texture =
            Texture::load_or_white(gl, settings.asset("textures/wall.png"), Wrap::Repeat)
                .map_err(|e| e.to_string())?;

        Ok(Self {
            meshes,
            shader,
            wall_texture,
            color: Vec4::ONE,
        })
    }

    /// Draws every walkable cell. Solid cells have no geometry.
    pub fn draw(&self, grid: &Grid, camera: &Camera) {
        self.shader.use_program();
        self.shader.set_uniform("color", self.color);
        self.shader.set_uniform("main_tex", 0);
        self.wall_texture.bind(0);

        self.shader.set_uniform("view", camera.view());
        self.shader.set_uniform("projection", camera.projection());

        for cell in grid.path_cells() {
            let Some(mesh) = self.meshes.get(&cell.tile_type) else {
                continue;
            };
            self.shader
                .set_uniform("model", tile_transform(cell.x, cell.y, cell.rotation as f32));
            mesh.draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_transform_places_cell_on_xz_plane() {
        let origin = tile_transform(3, 7, 0.0).transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(3.0, 0.0, 7.0)).length() < 1e-6);
    }

    #[test]
    fn test_tile_transform_turns_walls() {
        // Wall 0 sits on -Z; a quarter turn moves it to -X.
        let wall = tile_transform(0, 0, 90.0).transform_point3(Vec3::new(0.0, 0.0, -0.5));
        assert!((wall - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-6);
    }
}
