//! Simulation configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::water::grid::MIN_EXTENT;

/// Initial camera placement and controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Units per second
    pub move_speed: f32,
    /// Radians per pixel of mouse drag
    pub mouse_scale: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [1.0, 20.0, 1.0],
            target: [5.0, 1.0, 5.0],
            fov_degrees: 90.0,
            near: 1.0,
            far: 1000.0,
            move_speed: 30.0,
            mouse_scale: 0.01,
        }
    }
}

/// Top-level configuration for a water scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid cells along X
    pub width: usize,
    /// Grid cells along Z
    pub length: usize,
    /// Seed for the initial heights. None = seed from OS entropy.
    pub seed: Option<u64>,
    /// World-space translation of the surface
    pub position: [f32; 3],
    pub light_direction: [f32; 3],
    pub light_color: [f32; 3],
    pub ambient_color: [f32; 3],
    pub camera: CameraConfig,
    /// Upper bound on the frame delta fed to the simulation, in seconds
    pub max_frame_delta: Option<f32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 50,
            length: 50,
            seed: None,
            position: [0.0; 3],
            light_direction: [0.0, 1.0, 0.0],
            light_color: [1.0, 1.0, 1.0],
            ambient_color: [0.2, 0.2, 0.2],
            camera: CameraConfig::default(),
            max_frame_delta: None,
        }
    }
}

impl SimConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_EXTENT || self.length < MIN_EXTENT {
            return Err(Error::InvalidDimensions {
                width: self.width,
                length: self.length,
            });
        }
        if let Some(max) = self.max_frame_delta {
            if max.is_nan() || max <= 0.0 {
                return Err(Error::Config(format!(
                    "max_frame_delta must be positive, got {max}"
                )));
            }
        }
        let cam = &self.camera;
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(Error::Config(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                cam.near, cam.far
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert_eq!((config.width, config.length), (50, 50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sim.json");

        let config = SimConfig {
            width: 12,
            length: 8,
            seed: Some(77),
            max_frame_delta: Some(0.05),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = SimConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{ "width": 20, "camera": { "fov_degrees": 60.0 } }"#).unwrap();
        assert_eq!(config.width, 20);
        assert_eq!(config.length, 50);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.far, 1000.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "width": 1 }"#).unwrap();
        assert!(matches!(
            SimConfig::load(&path),
            Err(Error::InvalidDimensions { width: 1, length: 50 })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(SimConfig::load(&path), Err(Error::Config(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(SimConfig::load(&missing), Err(Error::Io(_))));

        let config = SimConfig { max_frame_delta: Some(0.0), ..Default::default() };
        assert!(config.validate().is_err());
    }
}
