//! Slider error types

use thiserror::Error;

/// Errors raised while constructing a slider
///
/// Runtime input never errors; out-of-range values and bad geometry are
/// normalized instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SliderError {
    /// The range holds fewer than two integers
    #[error("Invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: i32, max: i32 },

    /// The settle spring is not physical
    #[error("Invalid spring configuration: stiffness={stiffness}, damping={damping}, mass={mass}")]
    InvalidSpring {
        stiffness: f32,
        damping: f32,
        mass: f32,
    },
}

/// Result type for slider operations
pub type Result<T> = std::result::Result<T, SliderError>;
