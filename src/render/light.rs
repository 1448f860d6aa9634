//! Scene lights supplied to the shading stage

use glam::Vec3;

/// Directional light: a direction and an RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    direction: Vec3,
    color: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Vec3) -> Self {
        Self { direction, color }
    }

    pub fn from_arrays(direction: [f32; 3], color: [f32; 3]) -> Self {
        Self::new(Vec3::from_array(direction), Vec3::from_array(color))
    }

    pub fn set_direction(&mut self, direction: impl Into<Vec3>) {
        self.direction = direction.into();
    }

    pub fn set_color(&mut self, color: impl Into<Vec3>) {
        self.color = color.into();
    }

    pub fn direction(&self) -> [f32; 3] {
        self.direction.to_array()
    }

    pub fn color(&self) -> [f32; 3] {
        self.color.to_array()
    }
}

impl Default for DirectionalLight {
    /// White light pointing straight up
    fn default() -> Self {
        Self::new(Vec3::Y, Vec3::ONE)
    }
}

/// Uniform ambient term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
}

impl AmbientLight {
    pub fn new(color: impl Into<Vec3>) -> Self {
        Self { color: color.into() }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(Vec3::splat(0.2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_accept_arrays_and_vectors() {
        let mut light = DirectionalLight::default();
        assert_eq!(light.direction(), [0.0, 1.0, 0.0]);
        assert_eq!(light.color(), [1.0, 1.0, 1.0]);

        light.set_direction([0.5, -1.0, 0.0]);
        light.set_color(Vec3::new(1.0, 0.9, 0.8));
        assert_eq!(light.direction(), [0.5, -1.0, 0.0]);
        assert_eq!(light.color(), [1.0, 0.9, 0.8]);
    }

    #[test]
    fn test_ambient_default() {
        assert_eq!(AmbientLight::default().color, Vec3::new(0.2, 0.2, 0.2));
    }
}
