//! Frame timing utilities

use std::time::{Duration, Instant};

/// Tracks frame timing and produces the delta fed to the simulation
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
    /// Deltas above this are clamped, so a stall does not destabilise the step
    max_delta: Option<Duration>,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
            max_delta: None,
        }
    }

    /// Clamp frame deltas to at most `max_secs`
    pub fn with_max_delta(mut self, max_secs: Option<f32>) -> Self {
        self.max_delta = max_secs.and_then(|s| Duration::try_from_secs_f32(s).ok());
        self
    }

    /// Call once per frame; returns the delta in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance the timer to `now`
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let mut delta = now.saturating_duration_since(self.last_frame);
        if let Some(max) = self.max_delta {
            if delta > max {
                log::warn!(
                    "Frame delta {:.1}ms clamped to {:.1}ms",
                    delta.as_secs_f32() * 1000.0,
                    max.as_secs_f32() * 1000.0
                );
                delta = max;
            }
        }
        self.delta = delta;
        self.last_frame = now;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now.saturating_duration_since(self.fps_timer);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }

        self.delta.as_secs_f32()
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
