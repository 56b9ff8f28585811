//! The player moves through the dungeon one tile at a time.
//!
//! Every accepted command starts a short transition, during which the camera
//! eases from the previous tile and facing to the new ones. Commands that
//! arrive before the transition has finished are dropped, not queued.

use glam::Vec3;

use crate::{camera::Camera, map::Grid};

/// How much the turn timer advances per second. A transition takes half a second.
pub const TURN_SPEED: f32 = 2.0;

/// A step relative to the direction the player is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MoveDirection {
    Forward = 0,
    Right = 1,
    Back = 2,
    Left = 3,
}

impl MoveDirection {
    /// The grid offset of a step along world axis `index` (taken modulo 4).
    fn offset(index: i32) -> (i32, i32) {
        match index.rem_euclid(4) {
            0 => (1, 0),
            1 => (0, 1),
            2 => (-1, 0),
            _ => (0, -1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Facing in degrees. Any multiple of 90, including negative ones.
    pub rotation: f32,
    pub prev_x: i32,
    pub prev_y: i32,
    pub prev_rotation: f32,
    /// Counts from 0 to 1 over a transition. Not clamped, so it keeps growing while idle.
    pub turn_timer: f32,
}

impl Player {
    /// Places an idle player on the given tile.
    pub fn new(x: i32, y: i32, rotation: f32) -> Self {
        Self {
            x,
            y,
            rotation,
            prev_x: x,
            prev_y: y,
            prev_rotation: rotation,
            turn_timer: 1.0,
        }
    }

    /// Returns `true` when the player can accept a new command.
    pub fn is_idle(&self) -> bool {
        self.turn_timer >= 1.0
    }

    fn snapshot(&mut self) {
        self.prev_x = self.x;
        self.prev_y = self.y;
        self.prev_rotation = self.rotation;
    }

    /// Steps one tile in `direction`, relative to the current facing.
    ///
    /// Returns `false` if the command was dropped because a transition is still
    /// running, or rejected because the target tile is not walkable. A
    /// rejected move leaves the player untouched.
    pub fn move_dir(&mut self, grid: &Grid, direction: MoveDirection) -> bool {
        if !self.is_idle() {
            return false;
        }

        let steps = (self.rotation / 90.0).floor() as i32;
        let (dx, dy) = MoveDirection::offset(direction as i32 + steps);
        let (x, y) = (self.x + dx, self.y + dy);

        if !grid.is_path(x, y) {
            log::debug!("Blocked move {direction:?} from ({}, {}) to ({x}, {y})", self.x, self.y);
            return false;
        }

        self.snapshot();
        self.x = x;
        self.y = y;
        self.turn_timer = 0.0;
        true
    }

    /// Turns 90 degrees. Always succeeds unless a transition is running.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.is_idle() {
            return false;
        }

        self.snapshot();
        self.rotation += if clockwise { 90.0 } else { -90.0 };
        self.turn_timer = 0.0;
        true
    }

    /// The eased transition progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        smoothstep(self.turn_timer.min(1.0))
    }

    /// Interpolated world position and facing for the current progress.
    pub fn pose(&self) -> (Vec3, f32) {
        let t = self.progress();
        let from = Vec3::new(self.prev_x as f32, 0.0, self.prev_y as f32);
        let to = Vec3::new(self.x as f32, 0.0, self.y as f32);
        let rotation = self.prev_rotation + (self.rotation - self.prev_rotation) * t;
        (from.lerp(to, t), rotation)
    }

    /// Moves the camera to the interpolated pose, then advances the turn timer.
    pub fn tick(&mut self, camera: &mut Camera, delta_time: f32) {
        let (position, rotation) = self.pose();
        camera.set_position(position);
        camera.set_rotation(Vec3::new(0.0, rotation, 0.0));

        self.turn_timer += delta_time * TURN_SPEED;
    }
}

/// Hermite smoothstep between 0 and 1.
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::parse_level;

    fn grid(level: &str) -> Grid {
        let mut grid = Grid::new();
        parse_level(&mut grid, level.as_bytes()).unwrap();
        grid
    }

    fn finish(player: &mut Player) {
        let mut camera = Camera::default();
        player.tick(&mut camera, 0.5);
    }

    #[test]
    fn test_forward_follows_facing() {
        let grid = grid("**\n**\n");
        let mut player = Player::new(0, 0, 0.0);

        assert!(player.move_dir(&grid, MoveDirection::Forward));
        assert_eq!((player.x, player.y), (1, 0));
        finish(&mut player);

        assert!(player.rotate(true));
        finish(&mut player);
        assert!(player.move_dir(&grid, MoveDirection::Forward));
        assert_eq!((player.x, player.y), (1, 1));
    }

    #[test]
    fn test_negative_rotation_remaps_like_positive() {
        let grid = grid("**\n**\n");
        let mut player = Player::new(1, 1, -90.0);

        // Facing -90 is the same as facing 270: forward is y - 1.
        assert!(player.move_dir(&grid, MoveDirection::Forward));
        assert_eq!((player.x, player.y), (1, 0));
    }

    #[test]
    fn test_blocked_move_leaves_player_untouched() {
        let grid = grid("*.\n");
        let mut player = Player::new(0, 0, 0.0);
        let before = player.clone();

        // Into a solid cell
        assert!(!player.move_dir(&grid, MoveDirection::Forward));
        assert_eq!(player, before);

        // Off the grid
        assert!(!player.move_dir(&grid, MoveDirection::Back));
        assert!(!player.move_dir(&grid, MoveDirection::Left));
        assert_eq!(player, before);
        assert!(player.is_idle());
    }

    #[test]
    fn test_second_command_in_transition_is_dropped() {
        let grid = grid("***\n");
        let mut player = Player::new(0, 0, 0.0);

        assert!(player.move_dir(&grid, MoveDirection::Forward));
        assert!(!player.move_dir(&grid, MoveDirection::Forward));
        assert!(!player.rotate(false));
        assert_eq!((player.x, player.y), (1, 0));
        assert_eq!(player.rotation, 0.0);
    }

    #[test]
    fn test_rotation_always_succeeds_when_idle() {
        let mut player = Player::new(4, 4, 0.0);
        assert!(player.rotate(false));
        assert_eq!(player.rotation, -90.0);
        assert_eq!(player.prev_rotation, 0.0);
        assert!(!player.is_idle());
    }

    #[test]
    fn test_tick_eases_camera_between_tiles() {
        let grid = grid("**\n");
        let mut player = Player::new(0, 0, 0.0);
        let mut camera = Camera::default();

        player.move_dir(&grid, MoveDirection::Forward);
        player.tick(&mut camera, 0.25);
        assert_eq!(camera.position(), Vec3::ZERO);

        // Timer is now 0.5, halfway through the smoothstep.
        player.tick(&mut camera, 0.25);
        assert!((camera.position().x - 0.5).abs() < 1e-6);

        player.tick(&mut camera, 0.25);
        assert_eq!(camera.position(), Vec3::new(1.0, 0.0, 0.0));
        assert!(player.is_idle());
    }

    #[test]
    fn test_timer_overshoots_but_pose_is_clamped() {
        let grid = grid("**\n");
        let mut player = Player::new(0, 0, 0.0);
        let mut camera = Camera::default();

        player.move_dir(&grid, MoveDirection::Forward);
        player.tick(&mut camera, 3.0);
        assert_eq!(player.turn_timer, 6.0);
        player.tick(&mut camera, 0.0);
        assert_eq!(camera.position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_tick_points_camera_along_facing() {
        let mut player = Player::new(0, 0, 90.0);
        let mut camera = Camera::default();
        player.tick(&mut camera, 0.016);

        assert_eq!(camera.euler(), Vec3::new(0.0, 90.0, 0.0));
        assert!((camera.forward() - Vec3::Z).length() < 1e-6);
    }
}
