//! Per frame input state gathered from SDL events.

use std::collections::HashSet;

use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
}

impl KeyboardState {
    pub fn is_down(&self, key: Keycode) -> bool {
        self.down.contains(&key)
    }

    pub fn was_pressed(&self, key: Keycode) -> bool {
        self.pressed.contains(&key)
    }
}

/// The current state of the mouse. Motion and scroll are relative to the last frame.
#[derive(Default)]
pub struct MouseState {
    pub delta: Vec2,
    pub scroll_delta: Vec2,
}

/// Keyboard and mouse state, rebuilt every frame from the event queue.
#[derive(Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Clears everything that only lasts a single frame.
    pub fn begin_frame(&mut self) {
        self.keyboard.pressed.clear();
        self.mouse.delta = Vec2::ZERO;
        self.mouse.scroll_delta = Vec2::ZERO;
    }

    pub fn press(&mut self, key: Keycode) {
        self.keyboard.down.insert(key);
        self.keyboard.pressed.insert(key);
    }

    pub fn release(&mut self, key: Keycode) {
        self.keyboard.down.remove(&key);
    }

    /// Folds one SDL event into the state.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::MouseMotion { xrel, yrel, .. } => {
                self.mouse.delta += Vec2::new(*xrel as f32, *yrel as f32);
            }
            Event::MouseWheel { x, y, .. } => {
                self.mouse.scroll_delta += Vec2::new(*x as f32, *y as f32);
            }
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => self.press(*keycode),
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => self.release(*keycode),
            _ => {}
        }
    }
}

/// Context handed to scenes during the update phase.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseState,
    pub delta_time: f32,
    /// Seconds since the application started.
    pub time: f32,
}

impl<'a> UpdateContext<'a> {
    pub fn new(input: &'a InputState, delta_time: f32, time: f32) -> Self {
        Self {
            keyboard: &input.keyboard,
            mouse: &input.mouse,
            delta_time,
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_only_lasts_one_frame() {
        let mut input = InputState::default();
        input.press(Keycode::W);
        assert!(input.keyboard.was_pressed(Keycode::W));
        assert!(input.keyboard.is_down(Keycode::W));

        input.begin_frame();
        assert!(!input.keyboard.was_pressed(Keycode::W));
        assert!(input.keyboard.is_down(Keycode::W));

        input.release(Keycode::W);
        assert!(!input.keyboard.is_down(Keycode::W));
    }

    #[test]
    fn test_begin_frame_resets_mouse_deltas() {
        let mut input = InputState::default();
        input.mouse.delta = Vec2::new(6.0, -2.0);
        input.mouse.scroll_delta = Vec2::new(0.0, 1.0);
        input.begin_frame();
        assert_eq!(input.mouse.delta, Vec2::ZERO);
        assert_eq!(input.mouse.scroll_delta, Vec2::ZERO);
    }
}
