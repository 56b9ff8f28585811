//! A block of textured cubes lit by a point light circling through it.

use std::sync::Arc;

use crawler_core::Camera;
use glam::Vec3;
use glow::HasContext;
use sdl2::keyboard::Keycode;

use crate::{
    abs::{ShaderProgram, Texture, Wrap},
    other::UpdateContext,
    render::model::{Model, ModelInstance, PointLight},
    scenes::{Scene, SceneSwitch, aspect_ratio, flycam::FlyCamera},
    settings::Settings,
};

const BLOCK_SIZE: usize = 4;
const BLOCK_SPACING: f32 = 2.0;

/// Cubes laid out on a `BLOCK_SIZE` lattice.
fn block_instances() -> Vec<ModelInstance> {
    let mut instances = Vec::with_capacity(BLOCK_SIZE.pow(3));
    for x in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            for z in 0..BLOCK_SIZE {
                let position = Vec3::new(x as f32, y as f32, z as f32) * BLOCK_SPACING;
                instances.push(ModelInstance::at(position));
            }
        }
    }
    instances
}

/// Light position at `time` seconds.
fn light_orbit(time: f32) -> Vec3 {
    Vec3::new(time.sin() * 1.3, (time * 0.5).sin(), time.cos() * 1.3)
}

pub struct LightingScene {
    fly: FlyCamera,
    cube: Model,
    shader: ShaderProgram,
    cubes: Vec<ModelInstance>,
    light: PointLight,
    marker: ModelInstance,
}

impl LightingScene {
    pub fn new(
        gl: &Arc<glow::Context>,
        settings: &Settings,
        (width, height): (u32, u32),
    ) -> Result<Self, String> {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(-2.0, 1.0, -2.0));
        camera.set_rotation(Vec3::new(-20.0, 45.0, 0.0));
        camera.set_fov(settings.fov);
        camera.set_near_far(0.01, settings.far);
        camera.set_aspect(aspect_ratio(width, height));

        let shader = ShaderProgram::from_files(
            gl,
            settings.asset("shaders/phong/vert.glsl"),
            settings.asset("shaders/phong/frag.glsl"),
        )?;
        let texture = Texture::load_or_white(gl, settings.asset("textures/crate.png"), Wrap::Repeat)
            .map_err(|e| e.to_string())?;
        let cube = Model::cube(gl, texture).map_err(|e| e.to_string())?;

        let light = PointLight {
            specular: Vec3::new(1.0, 0.0, 0.0),
            ..Default::default()
        };

        Ok(Self {
            fly: FlyCamera::new(camera, settings.fly_speed, settings.mouse_sensitivity),
            cube,
            shader,
            cubes: block_instances(),
            light,
            marker: ModelInstance {
                scale: Vec3::splat(0.2),
                ..Default::default()
            },
        })
    }
}

impl Scene for LightingScene {
    fn resize(&mut self, width: u32, height: u32) {
        self.fly.camera.set_aspect(aspect_ratio(width, height));
    }

    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.was_pressed(Keycode::Escape) {
            return SceneSwitch::Quit;
        }
        self.fly.update(ctx);
        self.light.position = light_orbit(ctx.time);
        self.marker.position = self.light.position;
        SceneSwitch::None
    }

    fn render(&mut self, gl: &Arc<glow::Context>) {
        unsafe {
            gl.clear_color(0.1, 0.1, 0.1, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let camera = &self.fly.camera;
        self.shader.use_program();
        self.shader.set_uniform("view", camera.view());
        self.shader.set_uniform("projection", camera.projection());
        self.shader.set_uniform("view_pos", camera.position());
        self.shader.set_uniform("material.diffuse", 0);
        self.shader.set_uniform("material.specular", Vec3::splat(0.1));
        self.shader.set_uniform("material.shininess", 8.0);
        self.light.apply(&self.shader);

        self.shader.set_uniform("unlit", false);
        for cube in &self.cubes {
            cube.draw(&self.shader, &self.cube);
        }

        self.shader.set_uniform("unlit", true);
        self.shader.set_uniform("tint", self.light.diffuse);
        self.marker.draw(&self.shader, &self.cube);
    }
}
