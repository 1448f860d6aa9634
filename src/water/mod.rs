//! Heightfield water simulation and the surface mesh derived from it.

pub mod grid;
pub mod heightfield;
pub mod mesh;
pub mod diagnostics;

pub use grid::Grid2;
pub use heightfield::{HeightField, VELOCITY_DAMPER};
pub use mesh::{MeshBuffer, SurfaceMesh};
pub use diagnostics::FieldStats;
