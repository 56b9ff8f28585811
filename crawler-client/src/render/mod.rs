//! Module for anything related to rendering.
//!
//! This module contains the tile geometry and map renderer for the dungeon and
//! the model, instance and light types used by the test scenes.

pub mod map;
pub mod model;
pub mod tiles;
