//! Frame clocks
//!
//! Engines in this workspace never read time themselves; the host feeds them
//! a frame delta. These clocks produce that delta.

use std::time::Instant;

/// Source of per-frame time deltas in seconds
pub trait FrameClock {
    /// Seconds elapsed since the previous call
    fn next_delta(&mut self) -> f32;
}

/// Measures real elapsed time between frames
#[derive(Clone, Debug)]
pub struct WallClock {
    last_frame: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn next_delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }
}

/// Deterministic clock that advances by the same step every frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock {
    step: f32,
    frames: u64,
}

impl FixedClock {
    /// Create a clock ticking at `fps` frames per second
    ///
    /// A zero rate is treated as 1 fps.
    pub fn from_fps(fps: u32) -> Self {
        Self {
            step: 1.0 / fps.max(1) as f32,
            frames: 0,
        }
    }

    /// The fixed delta returned by every frame
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Number of frames produced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated seconds elapsed so far
    pub fn elapsed(&self) -> f32 {
        self.frames as f32 * self.step
    }
}

impl FrameClock for FixedClock {
    fn next_delta(&mut self) -> f32 {
        self.frames += 1;
        self.step
    }
}
