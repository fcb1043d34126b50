//! Single-owner animated values
//!
//! [`AnimatedValue`] owns its spring directly instead of registering it with a
//! shared scheduler. The owner advances it from its own frame loop, which keeps
//! everything on one thread and makes every intermediate frame observable.
//!
//! ```rust
//! use leverage_animation::{AnimatedValue, SpringConfig};
//!
//! let mut offset = AnimatedValue::new(0.0, SpringConfig::settle());
//!
//! // Follow the pointer 1:1
//! offset.set_immediate(120.0);
//!
//! // Then settle onto a tick
//! offset.set_target(100.0);
//! while offset.step(1.0 / 60.0) {}
//! assert_eq!(offset.get(), 100.0);
//! ```

use crate::spring::{Spring, SpringConfig};

/// Distance below which a new target does not start a spring
const START_THRESHOLD: f32 = 0.001;

/// A value that either sits still or moves toward a mutable target on a spring
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    spring: Option<Spring>,
    config: SpringConfig,
    /// Last value produced (equals `target` once settled)
    current: f32,
    /// The value we're animating towards
    target: f32,
}

impl AnimatedValue {
    /// Create a new animated value resting at `initial`
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        Self {
            spring: None,
            config,
            current: initial,
            target: initial,
        }
    }

    /// Create with the default settle spring
    pub fn with_default(initial: f32) -> Self {
        Self::new(initial, SpringConfig::default())
    }

    /// Set the target value - starts animation if different from current
    ///
    /// An in-flight spring is retargeted and keeps its position and velocity,
    /// so repeated calls never jump or queue.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;

        if let Some(spring) = self.spring.as_mut() {
            spring.set_target(target);
        } else if (target - self.current).abs() > START_THRESHOLD {
            let mut spring = Spring::new(self.config, self.current);
            spring.set_target(target);
            self.spring = Some(spring);
        } else {
            self.current = target;
        }
    }

    /// Get the current animated value
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get the current target value
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current velocity in units per second (zero when resting)
    pub fn velocity(&self) -> f32 {
        self.spring.map_or(0.0, |s| s.velocity())
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: f32) {
        self.spring = None;
        self.current = value;
        self.target = value;
    }

    /// Snap immediately to the target value, stopping any active animation
    pub fn snap_to_target(&mut self) {
        self.set_immediate(self.target);
    }

    /// Check if currently animating
    pub fn is_animating(&self) -> bool {
        self.spring.is_some()
    }

    /// The spring configuration used for new animations
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Replace the spring configuration
    ///
    /// An in-flight animation continues from its current position and
    /// velocity with the new parameters.
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
        if let Some(spring) = self.spring.as_mut() {
            spring.set_config(config);
        }
    }

    /// Advance the animation by `dt` seconds
    ///
    /// Returns `true` while the value is still moving. The frame that
    /// settles the spring lands exactly on the target and returns `false`.
    pub fn step(&mut self, dt: f32) -> bool {
        let Some(spring) = self.spring.as_mut() else {
            return false;
        };

        spring.step(dt);
        if spring.is_settled() {
            self.current = self.target;
            self.spring = None;
            tracing::trace!("AnimatedValue settled at {}", self.target);
            return false;
        }

        self.current = spring.value();
        true
    }
}
