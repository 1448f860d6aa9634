//! Uniform block for the lit, textured surface shader

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::core::camera::Camera;
use super::light::{AmbientLight, DirectionalLight};

/// Per-draw shading parameters (must match shader struct exactly).
/// WGSL vec3 has 16-byte alignment, so every vec3 carries explicit padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ShadingUniforms {
    /// Model to world (64 bytes, offset 0)
    pub world: [[f32; 4]; 4],
    /// World to camera (64 bytes, offset 64)
    pub view: [[f32; 4]; 4],
    /// Camera to clip (64 bytes, offset 128)
    pub projection: [[f32; 4]; 4],
    /// Camera position in world space (offset 192)
    pub camera_pos: [f32; 3],
    pub _pad0: f32,
    /// Direction of the directional light (offset 208)
    pub light_dir: [f32; 3],
    pub _pad1: f32,
    /// Directional light color (offset 224)
    pub light_color: [f32; 3],
    pub _pad2: f32,
    /// Ambient color (offset 240)
    pub ambient_color: [f32; 3],
    pub _pad3: f32,
}

impl ShadingUniforms {
    pub fn new(
        world: Mat4,
        camera: &Camera,
        light: &DirectionalLight,
        ambient: &AmbientLight,
    ) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _pad0: 0.0,
            light_dir: light.direction(),
            _pad1: 0.0,
            light_color: light.color(),
            _pad2: 0.0,
            ambient_color: ambient.color.to_array(),
            _pad3: 0.0,
        }
    }
}

impl Default for ShadingUniforms {
    fn default() -> Self {
        Self {
            world: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 3],
            _pad0: 0.0,
            light_dir: Vec3::Y.to_array(),
            _pad1: 0.0,
            light_color: [1.0; 3],
            _pad2: 0.0,
            ambient_color: [0.2; 3],
            _pad3: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size() {
        let size = std::mem::size_of::<ShadingUniforms>();
        assert_eq!(size, 256, "ShadingUniforms must be exactly 256 bytes, got {} bytes", size);
    }

    #[test]
    fn test_from_scene_parts() {
        let camera = Camera::default();
        let light = DirectionalLight::from_arrays([0.0, -1.0, 0.0], [1.0, 0.5, 0.25]);
        let ambient = AmbientLight::new([0.1, 0.1, 0.1]);
        let world = Mat4::from_translation(Vec3::new(3.0, 0.0, -2.0));

        let u = ShadingUniforms::new(world, &camera, &light, &ambient);
        assert_eq!(u.world[3], [3.0, 0.0, -2.0, 1.0]);
        assert_eq!(u.camera_pos, camera.position.to_array());
        assert_eq!(u.light_dir, [0.0, -1.0, 0.0]);
        assert_eq!(u.light_color, [1.0, 0.5, 0.25]);
        assert_eq!(u.ambient_color, [0.1, 0.1, 0.1]);
        assert_eq!(u.view, camera.view_matrix().to_cols_array_2d());
    }
}
