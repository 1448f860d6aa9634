//! Hand-off point between the simulation and whatever draws it.
//!
//! The simulation never talks to a GPU. Each frame it packages the mesh and
//! shading parameters into a [`DrawRequest`] and passes it to a
//! [`SurfaceRenderer`], which owns device, pipeline and texture state.

use glam::Mat4;

use crate::water::MeshBuffer;
use super::uniforms::ShadingUniforms;

/// Opaque texture reference resolved by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Everything needed to draw the water surface once.
#[derive(Clone, Copy, Debug)]
pub struct DrawRequest<'a> {
    /// World transform of the surface (translation only)
    pub world: Mat4,
    pub texture: TextureHandle,
    pub mesh: MeshBuffer<'a>,
    pub uniforms: ShadingUniforms,
}

/// Rendering collaborator. Must finish consuming `request.mesh` before
/// returning; the buffer is rewritten on the next frame.
pub trait SurfaceRenderer {
    type Error;

    fn draw_surface(&mut self, request: &DrawRequest<'_>) -> Result<(), Self::Error>;
}

/// Renderer that only records what it was asked to upload.
///
/// Used by the headless runner and in tests.
#[derive(Debug, Default)]
pub struct CountingRenderer {
    pub draws: u64,
    pub bytes_uploaded: u64,
    pub last_triangle_count: usize,
}

impl SurfaceRenderer for CountingRenderer {
    type Error = std::convert::Infallible;

    fn draw_surface(&mut self, request: &DrawRequest<'_>) -> Result<(), Self::Error> {
        self.draws += 1;
        self.bytes_uploaded += request.mesh.as_bytes().len() as u64;
        self.last_triangle_count = request.mesh.triangle_count;
        log::trace!(
            "draw #{}: {} triangles, texture {:?}",
            self.draws,
            request.mesh.triangle_count,
            request.texture
        );
        Ok(())
    }
}
