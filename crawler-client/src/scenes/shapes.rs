//! A wall of vertex coloured cubes wobbling in waves, plus a flat triangle
//! and quad in front of it.

use std::sync::Arc;

use crawler_core::Camera;
use glam::{Mat4, Vec2, Vec3};
use glow::HasContext;
use sdl2::keyboard::Keycode;

use crate::{
    abs::{Mesh, ShaderProgram, Texture, Vertex, Wrap, float_attrib},
    other::UpdateContext,
    scenes::{Scene, SceneSwitch, aspect_ratio, flycam::FlyCamera},
    settings::Settings,
};

const GRID_WIDTH: usize = 20;
const GRID_HEIGHT: usize = 20;
const GRID_SPACING: f32 = 1.75;

#[derive(Clone, Copy, Debug)]
#[repr(C)]
struct ColorVertex {
    position: Vec3,
    color: Vec3,
    uv: Vec2,
}

impl Vertex for ColorVertex {
    fn vertex_attribs(gl: &glow::Context) {
        let vec3 = std::mem::size_of::<Vec3>();
        unsafe {
            float_attrib::<ColorVertex>(gl, 0, 3, 0);
            float_attrib::<ColorVertex>(gl, 1, 3, vec3);
            float_attrib::<ColorVertex>(gl, 2, 2, vec3 * 2);
        }
    }
}

const fn cv(position: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> ColorVertex {
    ColorVertex {
        position: Vec3::from_array(position),
        color: Vec3::from_array(color),
        uv: Vec2::from_array(uv),
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];

/// Corners of each face in the order red, green, blue, yellow.
const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
    [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
    [[-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5]],
    [[0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5]],
    [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
    [[-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
];

fn cube_vertices() -> Vec<ColorVertex> {
    let colors = [RED, GREEN, BLUE, YELLOW];
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    CUBE_FACES
        .iter()
        .flat_map(|face| [0, 1, 2, 2, 3, 0].map(|i| cv(face[i], colors[i], uvs[i])))
        .collect()
}

const TRIANGLE: [ColorVertex; 3] = [
    cv([0.5, -0.5, 0.0], RED, [1.0, 0.0]),
    cv([-0.5, -0.5, 0.0], GREEN, [0.0, 0.0]),
    cv([0.0, 0.5, 0.0], BLUE, [0.5, 1.0]),
];

const QUAD: [ColorVertex; 4] = [
    cv([0.5, 0.5, 0.0], RED, [1.0, 1.0]),
    cv([0.5, -0.5, 0.0], GREEN, [1.0, 0.0]),
    cv([-0.5, -0.5, 0.0], BLUE, [0.0, 0.0]),
    cv([-0.5, 0.5, 0.0], YELLOW, [0.0, 1.0]),
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Where cube `index` of the wall sits, row by row, centred on the origin.
fn grid_position(index: usize) -> Vec3 {
    let (x, y) = (index / GRID_WIDTH, index % GRID_WIDTH);
    Vec3::new(
        (x as f32 - GRID_WIDTH as f32 / 2.0) * GRID_SPACING,
        (y as f32 - GRID_HEIGHT as f32 / 2.0) * GRID_SPACING,
        0.0,
    )
}

/// Wobble angle in radians. Cubes in the same column swing together.
fn wobble(index: usize, time: f32) -> f32 {
    let column = (index / GRID_WIDTH) as f32;
    let phase = (column * 15.0).to_radians() - 55f32.to_radians() * time;
    phase.sin().sin().sin().sin() * 8.0
}

pub struct ShapesScene {
    fly: FlyCamera,
    cube: Mesh,
    triangle: Mesh,
    quad: Mesh,
    shader: ShaderProgram,
    texture: Texture,
    time: f32,
}

impl ShapesScene {
    pub fn new(
        gl: &Arc<glow::Context>,
        settings: &Settings,
        (width, height): (u32, u32),
    ) -> Result<Self, String> {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 0.0, 25.0));
        camera.set_near_far(settings.near, settings.far);
        camera.set_aspect(aspect_ratio(width, height));

        let shader = ShaderProgram::from_files(
            gl,
            settings.asset("shaders/color/vert.glsl"),
            settings.asset("shaders/color/frag.glsl"),
        )?;
        let texture = Texture::load_or_white(gl, settings.asset("textures/crate.png"), Wrap::Repeat)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            fly: FlyCamera::new(camera, settings.fly_speed * 2.0, settings.mouse_sensitivity),
            cube: Mesh::new_arrays(gl, &cube_vertices(), glow::TRIANGLES)?,
            triangle: Mesh::new_arrays(gl, &TRIANGLE, glow::TRIANGLES)?,
            quad: Mesh::new(gl, &QUAD, &QUAD_INDICES, glow::TRIANGLES)?,
            shader,
            texture,
            time: 0.0,
        })
    }
}

impl Scene for ShapesScene {
    fn resize(&mut self, width: u32, height: u32) {
        self.fly.camera.set_aspect(aspect_ratio(width, height));
    }

    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.was_pressed(Keycode::Escape) {
            return SceneSwitch::Quit;
        }
        self.fly.update(ctx);
        self.time = ctx.time;
        SceneSwitch::None
    }

    fn render(&mut self, gl: &Arc<glow::Context>) {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let camera = &self.fly.camera;
        self.shader.use_program();
        self.shader.set_uniform("view", camera.view());
        self.shader.set_uniform("projection", camera.projection());
        self.shader.set_uniform("main_tex", 0);
        self.texture.bind(0);

        let axis = Vec3::new(0.5, 1.0, 0.0).normalize();
        for i in 0..GRID_WIDTH * GRID_HEIGHT {
            let model = Mat4::from_translation(grid_position(i))
                * Mat4::from_axis_angle(axis, wobble(i, self.time));
            self.shader.set_uniform("model", model);
            self.cube.draw();
        }

        self.shader
            .set_uniform("model", Mat4::from_translation(Vec3::new(-1.0, 0.0, 5.0)));
        self.triangle.draw();
        self.shader
            .set_uniform("model", Mat4::from_translation(Vec3::new(1.0, 0.0, 5.0)));
        self.quad.draw();
    }
}
