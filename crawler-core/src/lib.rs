//! The core of the dungeon crawler. This crate contains the game logic that
//! does not need a window or a graphics context: the tile grid and its
//! classifier, the level loader, the turn based player and the camera.
//!
//! Everything here is plain owned state. The client owns one instance of each
//! and passes them by reference into the update functions.

pub mod camera;
pub mod level;
pub mod map;
pub mod player;

pub use camera::Camera;
pub use level::{LevelError, load_level, parse_level};
pub use map::{Cell, Grid, MAP_HEIGHT, MAP_WIDTH, TileType};
pub use player::{MoveDirection, Player};
