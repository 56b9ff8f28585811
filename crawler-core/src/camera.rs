//! A perspective camera driven by euler angles.
//!
//! The euler triple is stored as `(pitch, yaw, roll)` in degrees. The forward
//! vector is rebuilt from pitch and yaw whenever the rotation changes. The
//! camera never clamps its own pitch; callers that need it call
//! [`Camera::clamp_pitch`] after rotating.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    euler: Vec3,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            euler: Vec3::new(0.0, -90.0, 0.0),
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            aspect: 800.0 / 600.0,
        }
    }
}

impl Camera {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// The `(pitch, yaw, roll)` triple in degrees.
    pub fn euler(&self) -> Vec3 {
        self.euler
    }

    /// Unit vector pointing to the right of the view direction.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.position += translation;
    }

    /// Sets the rotation and recomputes the forward vector.
    pub fn set_rotation(&mut self, euler: Vec3) {
        self.euler = euler;

        let pitch = euler.x.to_radians();
        let yaw = euler.y.to_radians();
        self.forward = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
    }

    pub fn rotate(&mut self, delta: Vec3) {
        self.set_rotation(self.euler + delta);
    }

    /// Limits the pitch to `[min, max]` degrees.
    pub fn clamp_pitch(&mut self, min: f32, max: f32) {
        if self.euler.x > max {
            self.set_rotation(self.euler.with_x(max));
        } else if self.euler.x < min {
            self.set_rotation(self.euler.with_x(min));
        }
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Sets the vertical field of view in degrees.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_near_far(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let mut camera = Camera::default();
        assert_eq!(camera.forward(), Vec3::NEG_Z);

        // Re-deriving from the default euler gives the same direction.
        camera.set_rotation(camera.euler());
        assert!(approx(camera.forward(), Vec3::NEG_Z));
    }

    #[test]
    fn test_forward_from_yaw_and_pitch() {
        let mut camera = Camera::default();

        camera.set_rotation(Vec3::new(0.0, 0.0, 0.0));
        assert!(approx(camera.forward(), Vec3::X));

        camera.set_rotation(Vec3::new(0.0, 180.0, 0.0));
        assert!(approx(camera.forward(), Vec3::NEG_X));

        camera.set_rotation(Vec3::new(90.0, 0.0, 0.0));
        assert!(approx(camera.forward(), Vec3::Y));
    }

    #[test]
    fn test_pitch_is_only_clamped_on_request() {
        let mut camera = Camera::default();
        camera.rotate(Vec3::new(120.0, 0.0, 0.0));
        assert_eq!(camera.euler().x, 120.0);

        camera.clamp_pitch(-89.0, 89.0);
        assert_eq!(camera.euler().x, 89.0);

        camera.rotate(Vec3::new(-300.0, 0.0, 0.0));
        camera.clamp_pitch(-89.0, 89.0);
        assert_eq!(camera.euler().x, -89.0);
        assert!(camera.forward().y < 0.0);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        camera.translate(Vec3::new(-1.0, 0.5, 0.0));
        assert_eq!(camera.position(), Vec3::new(0.0, 2.5, 3.0));
    }

    #[test]
    fn test_view_maps_target_onto_negative_z() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(2.0, 0.0, 2.0));
        camera.set_rotation(Vec3::new(0.0, 0.0, 0.0));

        let target = camera.view().transform_point3(Vec3::new(5.0, 0.0, 2.0));
        assert!(approx(target, Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_right_is_perpendicular() {
        let mut camera = Camera::default();
        camera.set_rotation(Vec3::new(10.0, 37.0, 0.0));
        assert!(camera.right().dot(camera.forward()).abs() < 1e-5);
        assert!((camera.right().length() - 1.0).abs() < 1e-5);
    }
}
