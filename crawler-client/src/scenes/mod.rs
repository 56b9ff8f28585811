//! Module providing the `Scene` trait and all scene implementations.
//!
//! This module serves as a central point for managing the dungeon and the
//! three renderer test scenes.

use std::{str::FromStr, sync::Arc};

use crate::{other::UpdateContext, settings::Settings};

pub mod dungeon;
pub mod flycam;
pub mod lighting;
pub mod models;
pub mod shapes;

/// What the frame loop should do after a scene update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSwitch {
    None,
    Quit,
}

/// The Scene trait defines the common interface for all scenes in the client.
pub trait Scene {
    /// Handles an event.
    fn handle_event(&mut self, _event: &sdl2::event::Event) {}

    /// Called when the drawable area changes size.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Updates the scene state.
    fn update(&mut self, _ctx: &UpdateContext) -> SceneSwitch {
        SceneSwitch::None
    }

    /// Renders the scene.
    fn render(&mut self, gl: &Arc<glow::Context>);
}

/// Owns the running scene and forwards the frame loop to it.
pub struct SceneManager {
    scene: Box<dyn Scene>,
}

impl SceneManager {
    /// Creates a new SceneManager running the given scene.
    pub fn new(scene: Box<dyn Scene>) -> Self {
        Self { scene }
    }

    /// Handles an event by passing it to the scene.
    pub fn handle_event(&mut self, event: &sdl2::event::Event) {
        self.scene.handle_event(event);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    /// Updates the scene.
    ///
    /// Returns `false` once the scene asks to quit.
    pub fn update(&mut self, ctx: &UpdateContext) -> bool {
        match self.scene.update(ctx) {
            SceneSwitch::None => true,
            SceneSwitch::Quit => false,
        }
    }

    /// Renders the scene.
    pub fn render(&mut self, gl: &Arc<glow::Context>) {
        self.scene.render(gl);
    }
}

/// The scenes that can be picked on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneKind {
    #[default]
    Dungeon,
    Shapes,
    Lighting,
    Models,
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dungeon" => Ok(Self::Dungeon),
            "shapes" => Ok(Self::Shapes),
            "lighting" => Ok(Self::Lighting),
            "models" => Ok(Self::Models),
            _ => Err(format!(
                "Unknown scene '{s}', expected one of dungeon, shapes, lighting, models"
            )),
        }
    }
}

impl SceneKind {
    /// Reads the scene from the first argument, falling back to the dungeon.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|e: String| {
                log::error!("{e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Dungeon => "Dungeon Crawler",
            Self::Shapes => "Dungeon Crawler - Shapes",
            Self::Lighting => "Dungeon Crawler - Lighting",
            Self::Models => "Dungeon Crawler - Models",
        }
    }

    pub fn build(
        self,
        gl: &Arc<glow::Context>,
        settings: &Settings,
        size: (u32, u32),
    ) -> Result<Box<dyn Scene>, String> {
        Ok(match self {
            Self::Dungeon => Box::new(dungeon::DungeonScene::new(gl, settings, size)?),
            Self::Shapes => Box::new(shapes::ShapesScene::new(gl, settings, size)?),
            Self::Lighting => Box::new(lighting::LightingScene::new(gl, settings, size)?),
            Self::Models => Box::new(models::ModelScene::new(gl, settings, size)?),
        })
    }
}

/// Width over height, guarding against a minimised window.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}
