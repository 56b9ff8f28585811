//! The dungeon crawler itself: a level, a player and the map renderer.

use std::sync::Arc;

use crawler_core::{Camera, Grid, MoveDirection, Player, load_level};
use glow::HasContext;
use sdl2::keyboard::Keycode;

use crate::{
    other::{KeyboardState, UpdateContext},
    render::map::MapRenderer,
    scenes::{Scene, SceneSwitch, aspect_ratio},
    settings::Settings,
};

/// A player command read from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(MoveDirection),
    Rotate { clockwise: bool },
}

/// Keys in priority order. Only the first held key is acted on each frame.
const BINDINGS: [(Keycode, Command); 6] = [
    (Keycode::W, Command::Move(MoveDirection::Forward)),
    (Keycode::D, Command::Move(MoveDirection::Right)),
    (Keycode::S, Command::Move(MoveDirection::Back)),
    (Keycode::A, Command::Move(MoveDirection::Left)),
    (Keycode::E, Command::Rotate { clockwise: true }),
    (Keycode::Q, Command::Rotate { clockwise: false }),
];

fn read_command(keyboard: &KeyboardState) -> Option<Command> {
    BINDINGS
        .iter()
        .find(|(key, _)| keyboard.is_down(*key))
        .map(|&(_, command)| command)
}

pub struct DungeonScene {
    grid: Grid,
    player: Player,
    camera: Camera,
    renderer: MapRenderer,
    level_path: std::path::PathBuf,
}

impl DungeonScene {
    pub fn new(
        gl: &Arc<glow::Context>,
        settings: &Settings,
        (width, height): (u32, u32),
    ) -> Result<Self, String> {
        let mut camera = Camera::default();
        camera.set_fov(settings.fov);
        camera.set_near_far(settings.near, settings.far);
        camera.set_aspect(aspect_ratio(width, height));

        let mut scene = Self {
            grid: Grid::new(),
            player: Player::new(0, 0, 0.0),
            camera,
            renderer: MapRenderer::new(gl, settings)?,
            level_path: settings.asset(&settings.level),
        };
        scene.reload();
        Ok(scene)
    }

    /// Loads the level again. A failed load leaves an empty dungeon.
    fn reload(&mut self) {
        if let Err(e) = load_level(&mut self.grid, &self.level_path) {
            log::warn!("Continuing without a level: {e}");
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Move(direction) => {
                self.player.move_dir(&self.grid, direction);
            }
            Command::Rotate { clockwise } => {
                self.player.rotate(clockwise);
            }
        }
    }
}

impl Scene for DungeonScene {
    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(aspect_ratio(width, height));
    }

    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.was_pressed(Keycode::Escape) {
            return SceneSwitch::Quit;
        }
        if ctx.keyboard.was_pressed(Keycode::R) {
            log::info!("Reloading {}", self.level_path.display());
            self.reload();
        }

        if let Some(command) = read_command(ctx.keyboard) {
            self.apply(command);
        }
        self.player.tick(&mut self.camera, ctx.delta_time);

        SceneSwitch::None
    }

    fn render(&mut self, gl: &Arc<glow::Context>) {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        self.renderer.draw(&self.grid, &self.camera);
    }
}
