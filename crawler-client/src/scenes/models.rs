//! Instances of an imported glTF model under a moving point light.

use std::sync::Arc;

use crawler_core::Camera;
use glam::Vec3;
use glow::HasContext;
use sdl2::keyboard::Keycode;

use crate::{
    abs::{ShaderProgram, Texture},
    other::UpdateContext,
    render::model::{Model, ModelInstance, PointLight},
    scenes::{Scene, SceneSwitch, aspect_ratio, flycam::FlyCamera},
    settings::Settings,
};

const RING_SIZE: usize = 8;
const RING_RADIUS: f32 = 4.0;

/// Copies standing in a circle, each turned to face the centre.
fn ring_instances() -> Vec<ModelInstance> {
    (0..RING_SIZE)
        .map(|i| {
            let angle = 360.0 / RING_SIZE as f32 * i as f32;
            let (sin, cos) = angle.to_radians().sin_cos();
            ModelInstance {
                position: Vec3::new(sin * RING_RADIUS, 0.0, cos * RING_RADIUS),
                rotation: Vec3::new(0.0, angle + 180.0, 0.0),
                scale: Vec3::splat(0.5),
            }
        })
        .collect()
}

/// The swinging instance the light rides on.
fn swinger_pose(time: f32) -> (Vec3, Vec3) {
    (
        Vec3::new((time / 2.5).sin() * 8.0, 1.2, 0.0),
        Vec3::new(0.0, time * 90.0, 0.0),
    )
}

pub struct ModelScene {
    fly: FlyCamera,
    model: Model,
    shader: ShaderProgram,
    instances: Vec<ModelInstance>,
    swinger: ModelInstance,
    light: PointLight,
}

impl ModelScene {
    pub fn new(
        gl: &Arc<glow::Context>,
        settings: &Settings,
        (width, height): (u32, u32),
    ) -> Result<Self, String> {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(2.0, 1.0, 2.0));
        camera.set_rotation(Vec3::new(-20.0, 230.0, 0.0));
        camera.set_fov(settings.fov);
        camera.set_near_far(settings.near, 50.0);
        camera.set_aspect(aspect_ratio(width, height));

        let shader = ShaderProgram::from_files(
            gl,
            settings.asset("shaders/phong/vert.glsl"),
            settings.asset("shaders/phong/frag.glsl"),
        )?;

        let path = settings.asset("models/crate.gltf");
        let model = match Model::load(gl, &path) {
            Ok(model) => model,
            Err(e) => {
                log::error!("{e}, showing a plain cube instead");
                let white = Texture::white(gl).map_err(|e| e.to_string())?;
                Model::cube(gl, white).map_err(|e| e.to_string())?
            }
        };

        let light = PointLight {
            ambient: Vec3::splat(0.3),
            diffuse: Vec3::new(1.0, 0.3, 0.2),
            specular: Vec3::new(0.5, 0.7, 0.3),
            ..Default::default()
        };

        Ok(Self {
            fly: FlyCamera::new(camera, settings.fly_speed, settings.mouse_sensitivity),
            model,
            shader,
            instances: ring_instances(),
            swinger: ModelInstance {
                scale: Vec3::splat(0.35),
                ..Default::default()
            },
            light,
        })
    }
}

impl Scene for ModelScene {
    fn resize(&mut self, width: u32, height: u32) {
        self.fly.camera.set_aspect(aspect_ratio(width, height));
    }

    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.was_pressed(Keycode::Escape) {
            return SceneSwitch::Quit;
        }
        self.fly.update(ctx);

        (self.swinger.position, self.swinger.rotation) = swinger_pose(ctx.time);
        self.light.position = self.swinger.position;
        SceneSwitch::None
    }

    fn render(&mut self, gl: &Arc<glow::Context>) {
        unsafe {
            gl.clear_color(0.7, 0.7, 0.7, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let camera = &self.fly.camera;
        self.shader.use_program();
        self.shader.set_uniform("view", camera.view());
        self.shader.set_uniform("projection", camera.projection());
        self.shader.set_uniform("view_pos", camera.position());
        self.shader.set_uniform("material.diffuse", 0);
        self.shader.set_uniform("material.specular", Vec3::splat(0.5));
        self.shader.set_uniform("material.shininess", 32.0);
        self.shader.set_uniform("unlit", false);
        self.light.apply(&self.shader);

        for instance in &self.instances {
            instance.draw(&self.shader, &self.model);
        }
        self.swinger.draw(&self.shader, &self.model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_faces_centre() {
        let ring = ring_instances();
        assert_eq!(ring.len(), RING_SIZE);
        for instance in &ring {
            assert!((instance.position.length() - RING_RADIUS).abs() < 1e-4);
            // Local +Z is the facing direction.
            let facing = instance.transform().transform_vector3(Vec3::Z).normalize();
            let to_centre = -instance.position.normalize();
            assert!(facing.dot(to_centre) > 0.999);
        }
    }

    #[test]
    fn test_swinger_pose() {
        let (position, rotation) = swinger_pose(0.0);
        assert_eq!(position, Vec3::new(0.0, 1.2, 0.0));
        assert_eq!(rotation, Vec3::ZERO);
        let (position, rotation) = swinger_pose(2.0);
        assert!(position.x.abs() <= 8.0);
        assert_eq!(rotation.y, 180.0);
    }
}
