//! Free flying camera controls shared by the test scenes.

use crawler_core::Camera;
use glam::{Vec2, Vec3};
use sdl2::keyboard::Keycode;

use crate::other::{KeyboardState, UpdateContext};

pub const PITCH_LIMIT: f32 = 89.0;

pub struct FlyCamera {
    pub camera: Camera,
    /// Units per second.
    pub speed: f32,
    /// Degrees per pixel of mouse motion.
    pub sensitivity: f32,
}

impl FlyCamera {
    pub fn new(camera: Camera, speed: f32, sensitivity: f32) -> Self {
        Self {
            camera,
            speed,
            sensitivity,
        }
    }

    /// Moves and turns the camera from this frame's input.
    pub fn update(&mut self, ctx: &UpdateContext) {
        let axes = move_axes(ctx.keyboard);
        let boost = if ctx.keyboard.is_down(Keycode::LShift) {
            2.0
        } else {
            1.0
        };
        self.fly(axes, self.speed * boost * ctx.delta_time);
        self.look(ctx.mouse.delta, ctx.mouse.scroll_delta.y);
    }

    /// Moves `distance` along each axis in `axes` (forward, right, up).
    pub fn fly(&mut self, axes: Vec3, distance: f32) {
        let translation = self.camera.forward() * axes.x
            + self.camera.right() * axes.y
            + self.camera.up() * axes.z;
        self.camera.translate(translation * distance);
    }

    /// Turns by a mouse delta in pixels and zooms by a scroll amount.
    pub fn look(&mut self, mouse_delta: Vec2, scroll: f32) {
        if mouse_delta != Vec2::ZERO {
            self.camera
                .rotate(Vec3::new(-mouse_delta.y, mouse_delta.x, 0.0) * self.sensitivity);
            self.camera.clamp_pitch(-PITCH_LIMIT, PITCH_LIMIT);
        }
        if scroll != 0.0 {
            self.camera.set_fov(self.camera.fov() - scroll);
        }
    }
}

/// Forward, right and up components of the held movement keys.
fn move_axes(keyboard: &KeyboardState) -> Vec3 {
    let axis = |pos: Keycode, neg: Keycode| {
        keyboard.is_down(pos) as i32 as f32 - keyboard.is_down(neg) as i32 as f32
    };
    Vec3::new(
        axis(Keycode::W, Keycode::S),
        axis(Keycode::D, Keycode::A),
        axis(Keycode::E, Keycode::Q),
    )
}
