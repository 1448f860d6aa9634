//! Watersim - interactive heightfield water surface simulation

pub mod core;
pub mod water;
pub mod render;
pub mod scene;
