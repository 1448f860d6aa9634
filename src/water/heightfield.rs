//! Heightfield water simulation.
//!
//! Each cell carries a fluid height and a vertical velocity. Every step the
//! velocity is pulled toward the mean height of the cell's neighbours, damped,
//! and integrated into the height. The pass order is fixed:
//!
//! 1. rows `j = 0` and `j = L-1` (sweeping `i`)
//! 2. columns `i = 0` and `i = W-1` (sweeping `j`)
//! 3. interior cells with the 4-neighbour stencil
//! 4. copy fluid heights into the model heights read by the mesh
//! 5. forward-difference normals from the model heights
//!
//! Updates happen in place, so later cells in a sweep see the already
//! updated values of earlier ones. Corner cells belong to both border passes
//! and are relaxed twice per step.
//!
//! Stability is the caller's responsibility: large time steps make the
//! relaxation overshoot and heights grow without bound.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::core::types::Result;
use super::grid::Grid2;

/// Multiplicative velocity decay applied on every relaxation.
pub const VELOCITY_DAMPER: f32 = 0.99;

/// Integer part of the initial fluid height is drawn from this range.
const SEED_HEIGHT_RANGE: std::ops::Range<u32> = 1..6;

/// Simulation state for a rectangular water surface.
#[derive(Clone, Debug)]
pub struct HeightField {
    /// Amount of water in each cell, integrated every step
    fluid_height: Grid2<f32>,
    /// Rate of change of `fluid_height`
    velocity: Grid2<f32>,
    /// Model heights consumed by mesh derivation
    height: Grid2<f32>,
    /// Per-cell surface normal derived from `height`
    normal: Grid2<Vec3>,
}

impl HeightField {
    /// Create a field seeded from OS entropy.
    pub fn new(width: usize, length: usize) -> Result<Self> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        Self::with_rng(width, length, &mut rng)
    }

    /// Create a reproducible field from a fixed seed.
    pub fn with_seed(width: usize, length: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_rng(width, length, &mut rng)
    }

    /// Create a field, drawing initial heights from `rng`.
    ///
    /// Fluid heights are `uniform[0, 1) + uniform_int[1, 6)`; velocity,
    /// model height and normals start at zero.
    pub fn with_rng<R: Rng + ?Sized>(width: usize, length: usize, rng: &mut R) -> Result<Self> {
        let fluid_height = Grid2::from_fn(width, length, |_, _| {
            let jitter: f64 = rng.random();
            let base = rng.random_range(SEED_HEIGHT_RANGE);
            (jitter + f64::from(base)) as f32
        })?;

        log::debug!("Created {}x{} heightfield", width, length);

        Ok(Self {
            fluid_height,
            velocity: Grid2::filled(width, length, 0.0)?,
            height: Grid2::filled(width, length, 0.0)?,
            normal: Grid2::filled(width, length, Vec3::ZERO)?,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.fluid_height.width()
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.fluid_height.length()
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Any `dt` is accepted; zero still updates velocities but leaves heights
    /// untouched, negative values run the integration backwards.
    pub fn step(&mut self, dt: f32) {
        self.relax_row_borders(dt);
        self.relax_column_borders(dt);
        self.relax_interior(dt);
        self.height.copy_from(&self.fluid_height);
        self.recompute_normals();
    }

    /// Rows `j = 0` and `j = L-1`. Every cell averages three neighbours: its
    /// two in-row neighbours and the inward one, or for corners the in-row
    /// neighbour, the inward one and the diagonal between them.
    fn relax_row_borders(&mut self, dt: f32) {
        let w = self.width();
        let last = self.length() - 1;
        let inner = last - 1;

        for i in 0..w {
            if i == 0 {
                self.relax(i, 0, [(i + 1, 0), (i, 1), (i + 1, 1)], dt);
                self.relax(i, last, [(i + 1, last), (i, inner), (i + 1, inner)], dt);
            } else if i == w - 1 {
                self.relax(i, 0, [(i, 1), (i - 1, 0), (i - 1, 1)], dt);
                self.relax(i, last, [(i - 1, last), (i, inner), (i - 1, inner)], dt);
            } else {
                self.relax(i, 0, [(i + 1, 0), (i - 1, 0), (i, 1)], dt);
                self.relax(i, last, [(i + 1, last), (i - 1, last), (i, inner)], dt);
            }
        }
    }

    /// Columns `i = 0` and `i = W-1`, same stencil shapes as the row pass.
    fn relax_column_borders(&mut self, dt: f32) {
        let l = self.length();
        let last = self.width() - 1;
        let inner = last - 1;

        for j in 0..l {
            if j == 0 {
                self.relax(0, j, [(1, j), (0, j + 1), (1, j + 1)], dt);
                self.relax(last, j, [(inner, j), (last, j + 1), (inner, j + 1)], dt);
            } else if j == l - 1 {
                self.relax(0, j, [(1, j), (0, j - 1), (1, j - 1)], dt);
                self.relax(last, j, [(inner, j), (last, j - 1), (inner, j - 1)], dt);
            } else {
                self.relax(0, j, [(0, j + 1), (0, j - 1), (1, j)], dt);
                self.relax(last, j, [(last, j + 1), (last, j - 1), (inner, j)], dt);
            }
        }
    }

    fn relax_interior(&mut self, dt: f32) {
        for i in 1..self.width() - 1 {
            for j in 1..self.length() - 1 {
                self.relax(i, j, [(i - 1, j), (i + 1, j), (i, j - 1), (i, j + 1)], dt);
            }
        }
    }

    /// Pull cell `(i, j)` toward the mean of `neighbours`.
    #[inline]
    fn relax<const N: usize>(&mut self, i: usize, j: usize, neighbours: [(usize, usize); N], dt: f32) {
        let sum = neighbours
            .iter()
            .fold(0.0f32, |acc, &(ni, nj)| acc + self.fluid_height.get(ni, nj));
        let current = self.fluid_height.get(i, j);

        let mut v = self.velocity.get(i, j);
        v += sum / N as f32 - current;
        v *= VELOCITY_DAMPER;

        self.velocity.set(i, j, v);
        self.fluid_height.set(i, j, current + v * dt);
    }

    /// Normals for `i` in `[1, W-1)` and `j` in `[0, L-1)`. The outer columns
    /// and the last row keep whatever they held before.
    fn recompute_normals(&mut self) {
        for i in 1..self.width() - 1 {
            for j in 0..self.length() - 1 {
                let h = self.height.get(i, j);
                let along_z = Vec3::new(0.0, self.height.get(i, j + 1) - h, 1.0);
                let along_x = Vec3::new(1.0, h - self.height.get(i - 1, j), 0.0);
                self.normal.set(i, j, along_z.cross(along_x).normalize());
            }
        }
    }

    // -- Accessors --------------------------------------------------------

    pub fn fluid_height(&self, i: usize, j: usize) -> Option<f32> {
        self.fluid_height.try_get(i, j)
    }

    pub fn velocity(&self, i: usize, j: usize) -> Option<f32> {
        self.velocity.try_get(i, j)
    }

    /// Model height at `(i, j)`, as of the last completed step.
    pub fn height(&self, i: usize, j: usize) -> Option<f32> {
        self.height.try_get(i, j)
    }

    pub fn normal(&self, i: usize, j: usize) -> Option<Vec3> {
        self.normal.try_get(i, j)
    }

    pub fn fluid_heights(&self) -> &Grid2<f32> {
        &self.fluid_height
    }

    pub fn velocities(&self) -> &Grid2<f32> {
        &self.velocity
    }

    pub fn heights(&self) -> &Grid2<f32> {
        &self.height
    }

    pub fn normals(&self) -> &Grid2<Vec3> {
        &self.normal
    }

    // -- Mutation ---------------------------------------------------------

    /// Set the fluid height of one cell. Returns `false` if out of range.
    pub fn set_fluid_height(&mut self, i: usize, j: usize, value: f32) -> bool {
        if !self.fluid_height.contains(i, j) {
            return false;
        }
        self.fluid_height.set(i, j, value);
        true
    }

    /// Set every cell's fluid height to `value`.
    pub fn fill_fluid_height(&mut self, value: f32) {
        self.fluid_height.fill(value);
    }

    /// Set the velocity of one cell. Returns `false` if out of range.
    pub fn set_velocity(&mut self, i: usize, j: usize, value: f32) -> bool {
        if !self.velocity.contains(i, j) {
            return false;
        }
        self.velocity.set(i, j, value);
        true
    }

    /// Set every cell's velocity to `value`.
    pub fn fill_velocity(&mut self, value: f32) {
        self.velocity.fill(value);
    }

    /// Add `amount` to the fluid height at `(i, j)`, e.g. to drop a splash.
    pub fn disturb(&mut self, i: usize, j: usize, amount: f32) -> bool {
        match self.fluid_height.try_get(i, j) {
            Some(h) => {
                self.fluid_height.set(i, j, h + amount);
                true
            }
            None => false,
        }
    }
}
