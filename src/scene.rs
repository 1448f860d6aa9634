//! Water scene: the simulation, its mesh, camera and lights, driven once per
//! frame by the host loop.

use glam::{Mat4, Vec3};

use crate::core::camera::Camera;
use crate::core::camera_controller::FlyCameraController;
use crate::core::config::SimConfig;
use crate::core::input::InputState;
use crate::core::types::Result;
use crate::render::light::{AmbientLight, DirectionalLight};
use crate::render::surface::{DrawRequest, SurfaceRenderer, TextureHandle};
use crate::render::uniforms::ShadingUniforms;
use crate::water::{FieldStats, HeightField, SurfaceMesh};

pub struct WaterScene {
    field: HeightField,
    mesh: SurfaceMesh,
    /// World transform of the surface, translation only
    world: Mat4,
    camera: Camera,
    controller: FlyCameraController,
    light: DirectionalLight,
    ambient: AmbientLight,
    frames: u64,
}

impl WaterScene {
    /// Build a scene from `config`; `aspect` is the render target's width / height.
    pub fn new(config: &SimConfig, aspect: f32) -> Result<Self> {
        config.validate()?;

        let field = match config.seed {
            Some(seed) => HeightField::with_seed(config.width, config.length, seed)?,
            None => HeightField::new(config.width, config.length)?,
        };
        let mesh = SurfaceMesh::new(&field);

        let cam = &config.camera;
        let mut camera = Camera::look_at(
            Vec3::from_array(cam.position),
            Vec3::from_array(cam.target),
            Vec3::Y,
            cam.fov_degrees.to_radians(),
            aspect,
        );
        camera.near = cam.near;
        camera.far = cam.far;
        let controller = FlyCameraController::new(&camera, cam.move_speed, cam.mouse_scale);

        log::info!(
            "Water scene: {}x{} grid at {:?}, seed {:?}",
            config.width,
            config.length,
            config.position,
            config.seed
        );

        Ok(Self {
            field,
            mesh,
            world: Mat4::from_translation(Vec3::from_array(config.position)),
            camera,
            controller,
            light: DirectionalLight::from_arrays(config.light_direction, config.light_color),
            ambient: AmbientLight::new(config.ambient_color),
            frames: 0,
        })
    }

    /// Advance one frame: move the camera, step the water, resync the mesh.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        self.controller.update(&mut self.camera, input, dt);
        self.field.step(dt);
        self.mesh.refresh(&self.field);
        self.frames += 1;

        if log::log_enabled!(log::Level::Trace) {
            let stats = FieldStats::from_field(&self.field);
            log::trace!("frame {}: {:?}", self.frames, stats);
        }
    }

    /// Hand this frame's mesh and shading parameters to `renderer`.
    pub fn draw<R: SurfaceRenderer>(
        &self,
        renderer: &mut R,
        texture: TextureHandle,
    ) -> std::result::Result<(), R::Error> {
        let request = DrawRequest {
            world: self.world,
            texture,
            mesh: self.mesh.buffer(),
            uniforms: self.uniforms(),
        };
        renderer.draw_surface(&request)
    }

    pub fn uniforms(&self) -> ShadingUniforms {
        ShadingUniforms::new(self.world, &self.camera, &self.light, &self.ambient)
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Mutable access for perturbing the water between frames.
    pub fn field_mut(&mut self) -> &mut HeightField {
        &mut self.field
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        &mut self.light
    }

    pub fn ambient_mut(&mut self) -> &mut AmbientLight {
        &mut self.ambient
    }

    pub fn world(&self) -> Mat4 {
        self.world
    }

    /// Frames simulated so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats::from_field(&self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::render::surface::CountingRenderer;
    use winit::keyboard::KeyCode;

    fn small_config() -> SimConfig {
        SimConfig {
            width: 6,
            length: 4,
            seed: Some(5),
            position: [2.0, 0.0, -3.0],
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = SimConfig { width: 1, ..Default::default() };
        assert!(matches!(
            WaterScene::new(&config, 1.0),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_update_keeps_mesh_in_sync() {
        let mut scene = WaterScene::new(&small_config(), 16.0 / 9.0).unwrap();
        let input = InputState::new();

        for _ in 0..3 {
            scene.update(1.0 / 60.0, &input);
        }
        assert_eq!(scene.frames(), 3);

        let mesh = scene.mesh();
        let field = scene.field();
        // First vertex of cell (0, 0) and the second of the left triangle
        assert_eq!(mesh.vertices()[0].position[1], field.height(0, 0).unwrap());
        assert_eq!(mesh.vertices()[1].position[1], field.height(1, 1).unwrap());
        assert_eq!(mesh.vertices()[1].normal, field.normal(1, 1).unwrap().to_array());
        assert_eq!(field.heights(), field.fluid_heights());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let input = InputState::new();
        let mut a = WaterScene::new(&small_config(), 1.0).unwrap();
        let mut b = WaterScene::new(&small_config(), 1.0).unwrap();
        for _ in 0..10 {
            a.update(0.02, &input);
            b.update(0.02, &input);
        }
        assert_eq!(a.mesh().vertices(), b.mesh().vertices());
    }

    #[test]
    fn test_draw_hands_over_buffer() {
        let mut scene = WaterScene::new(&small_config(), 1.0).unwrap();
        scene.update(0.016, &InputState::new());

        let mut renderer = CountingRenderer::default();
        scene.draw(&mut renderer, TextureHandle(3)).unwrap();

        assert_eq!(renderer.draws, 1);
        assert_eq!(renderer.last_triangle_count, 2 * 5 * 3);
        assert_eq!(renderer.bytes_uploaded, (6 * 5 * 3 * 32) as u64);
        assert_eq!(scene.uniforms().world[3], [2.0, 0.0, -3.0, 1.0]);
    }

    #[test]
    fn test_camera_moves_with_input() {
        let mut scene = WaterScene::new(&small_config(), 1.0).unwrap();
        let start = scene.camera().position;
        let direction = scene.camera().direction;

        let mut input = InputState::new();
        input.press_key(KeyCode::KeyW);
        scene.update(0.1, &input);

        let moved = scene.camera().position - start;
        let expected = direction * SimConfig::default().camera.move_speed * 0.1;
        assert!((moved - expected).length() < 1e-4);
    }

    #[test]
    fn test_lights_reach_uniforms() {
        let mut scene = WaterScene::new(&small_config(), 1.0).unwrap();
        scene.light_mut().set_direction([1.0, 0.0, 0.0]);
        scene.ambient_mut().color = Vec3::splat(0.5);

        let u = scene.uniforms();
        assert_eq!(u.light_dir, [1.0, 0.0, 0.0]);
        assert_eq!(u.ambient_color, [0.5, 0.5, 0.5]);
        assert_eq!(u.camera_pos, scene.camera().position.to_array());
    }
}
