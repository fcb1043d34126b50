//! Leverage Animation System
//!
//! Spring physics for interruptible settle animations.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Settle Preset**: Critically damped configuration that never overshoots
//! - **Interruptible**: Retargeting an in-flight value keeps its position and velocity
//! - **Frame Clocks**: Wall-clock and fixed-step frame deltas for hosts and tests

pub mod animated;
pub mod clock;
pub mod spring;

pub use animated::AnimatedValue;
pub use clock::{FixedClock, FrameClock, WallClock};
pub use spring::{Spring, SpringConfig};
