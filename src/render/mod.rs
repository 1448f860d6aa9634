//! Rendering-facing data: vertex layout, lights, shader uniforms, and the
//! renderer hand-off trait.

pub mod vertex;
pub mod light;
pub mod uniforms;
pub mod surface;

pub use vertex::WaterVertex;
pub use light::{AmbientLight, DirectionalLight};
pub use uniforms::ShadingUniforms;
pub use surface::{CountingRenderer, DrawRequest, SurfaceRenderer, TextureHandle};
