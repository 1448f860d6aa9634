//! Free-flying perspective camera

use crate::core::types::{Mat4, Vec3};

/// Camera with position, view direction, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Unit view direction
    pub direction: Vec3,
    /// World up vector
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create camera at `position` looking at `target`
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3, fov_y: f32, aspect: f32) -> Self {
        let direction = (target - position).try_normalize().unwrap_or(-Vec3::Z);
        Self {
            position,
            direction,
            up,
            fov_y,
            aspect,
            near: 1.0,
            far: 1000.0,
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction, self.up)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Direction to the camera's left, `up x direction`
    pub fn left(&self) -> Vec3 {
        self.up.cross(self.direction)
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(
            Vec3::new(1.0, 20.0, 1.0),
            Vec3::new(5.0, 1.0, 5.0),
            Vec3::Y,
            std::f32::consts::FRAC_PI_2,
            16.0 / 9.0,
        )
    }
}
