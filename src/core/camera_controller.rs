//! Fly camera controller

use glam::Vec3;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::core::camera::Camera;
use crate::core::input::InputState;

/// Pitch limit, 89 degrees
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

const FORWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const BACK_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];

/// Fly camera: WASD/arrows move along the view direction, dragging with the
/// middle mouse button turns the view.
pub struct FlyCameraController {
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Radians of rotation per pixel of mouse drag
    pub mouse_scale: f32,
    /// Rotation around Y in radians
    yaw: f32,
    /// Rotation above the horizon in radians
    pitch: f32,
    /// Cursor position recorded on the previous drag frame
    last_cursor: (f32, f32),
    /// Middle button was held on the previous frame
    was_dragging: bool,
}

impl FlyCameraController {
    /// Create a controller whose angles match the camera's current direction
    pub fn new(camera: &Camera, move_speed: f32, mouse_scale: f32) -> Self {
        let d = camera.direction;
        Self {
            move_speed,
            mouse_scale,
            yaw: d.x.atan2(d.z),
            pitch: d.y.clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH),
            last_cursor: (0.0, 0.0),
            was_dragging: false,
        }
    }

    /// Update camera based on input
    pub fn update(&mut self, camera: &mut Camera, input: &InputState, dt: f32) {
        let step = self.move_speed * dt;

        if input.any_key_pressed(&LEFT_KEYS) {
            camera.position += camera.left() * step;
        }
        if input.any_key_pressed(&RIGHT_KEYS) {
            camera.position -= camera.left() * step;
        }
        if input.any_key_pressed(&FORWARD_KEYS) {
            camera.position += camera.direction * step;
        }
        if input.any_key_pressed(&BACK_KEYS) {
            camera.position -= camera.direction * step;
        }

        let dragging = input.is_mouse_button_pressed(MouseButton::Middle);
        if dragging {
            let (x, y) = input.cursor_position();
            // The first frame of a drag only records where it started
            if self.was_dragging {
                let dx = x - self.last_cursor.0;
                let dy = y - self.last_cursor.1;
                self.pitch = (self.pitch - dy * self.mouse_scale).clamp(-MAX_PITCH, MAX_PITCH);
                self.yaw -= dx * self.mouse_scale;
                camera.direction = self.direction();
            }
            self.last_cursor = (x, y);
        }
        self.was_dragging = dragging;
    }

    /// View direction for the current angles
    pub fn direction(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        Vec3::new(cos_p * sin_y, sin_p, cos_p * cos_y)
    }

    /// Get current yaw
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}
