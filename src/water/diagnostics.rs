//! Summary statistics over a heightfield, used for logging and for spotting
//! an unstable time step before the numbers run off to infinity.

use serde::{Deserialize, Serialize};

use super::heightfield::HeightField;

/// Snapshot of fluid height and velocity statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub min_height: f32,
    pub max_height: f32,
    pub mean_height: f32,
    /// Sum of fluid heights over all cells
    pub volume: f64,
    pub max_speed: f32,
    /// Mean squared velocity
    pub kinetic: f64,
}

impl FieldStats {
    pub fn from_field(field: &HeightField) -> Self {
        let heights = field.fluid_heights().as_slice();
        let velocities = field.velocities().as_slice();

        let mut min_height = f32::INFINITY;
        let mut max_height = f32::NEG_INFINITY;
        let mut volume = 0.0f64;
        for &h in heights {
            min_height = min_height.min(h);
            max_height = max_height.max(h);
            volume += f64::from(h);
        }

        let mut max_speed = 0.0f32;
        let mut kinetic = 0.0f64;
        for &v in velocities {
            max_speed = max_speed.max(v.abs());
            kinetic += f64::from(v) * f64::from(v);
        }

        let cells = heights.len() as f64;
        Self {
            min_height,
            max_height,
            mean_height: (volume / cells) as f32,
            volume,
            max_speed,
            kinetic: kinetic / cells,
        }
    }

    /// False once any tracked quantity has overflowed or gone NaN.
    ///
    /// `f32::max` skips NaN, so the sums are checked as well.
    pub fn is_finite(&self) -> bool {
        self.min_height.is_finite()
            && self.max_height.is_finite()
            && self.max_speed.is_finite()
            && self.volume.is_finite()
            && self.kinetic.is_finite()
    }
}
