//! Input state tracking

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard and mouse input state between frames
#[derive(Debug, Default)]
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Current cursor position in window pixels
    cursor_position: (f32, f32),
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => match state {
                ElementState::Pressed => self.press_key(*key_code),
                ElementState::Released => self.release_key(*key_code),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor_position(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press_button(*button),
                ElementState::Released => self.release_button(*button),
            },
            _ => {}
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_pressed.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.mouse_buttons.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.mouse_buttons.remove(&button);
    }

    pub fn set_cursor_position(&mut self, x: f32, y: f32) {
        self.cursor_position = (x, y);
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// True if any of `keys` is held
    pub fn any_key_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.keys_pressed.contains(k))
    }

    /// Check if key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Get current cursor position
    pub fn cursor_position(&self) -> (f32, f32) {
        self.cursor_position
    }

    /// Check if mouse button is pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }
}
