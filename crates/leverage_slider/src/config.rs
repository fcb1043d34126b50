//! Slider configuration and callbacks

use std::fmt;
use std::sync::Arc;

use leverage_animation::SpringConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SliderError};
use crate::mapper::ValueRange;
use crate::value::ValueMode;

fn default_min() -> i32 {
    2
}

fn default_max() -> i32 {
    10
}

fn default_value_suffix() -> String {
    "x".to_string()
}

/// Construction-time slider configuration
///
/// Presence of `value` makes the slider controlled for its whole lifetime.
/// Out-of-range `value`/`default_value` entries are clamped, not rejected.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SliderConfig {
    /// Owner-supplied value (controlled mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    /// Starting value for an uncontrolled slider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<i32>,
    #[serde(default = "default_min")]
    pub min: i32,
    #[serde(default = "default_max")]
    pub max: i32,
    #[serde(default)]
    pub disabled: bool,
    /// Spring used for settle animations
    #[serde(default)]
    pub spring: SpringConfig,
    /// Appended to the value for display and accessible value text ("6x")
    #[serde(default = "default_value_suffix")]
    pub value_suffix: String,
    /// Accessible name of the slider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            min: default_min(),
            max: default_max(),
            disabled: false,
            spring: SpringConfig::default(),
            value_suffix: default_value_suffix(),
            label: None,
        }
    }
}

impl SliderConfig {
    /// The validated value range
    pub fn range(&self) -> Result<ValueRange> {
        ValueRange::new(self.min, self.max)
    }

    /// Controlled when an owner value is present
    pub fn mode(&self) -> ValueMode {
        if self.value.is_some() {
            ValueMode::Controlled
        } else {
            ValueMode::Uncontrolled
        }
    }

    /// Starting value: explicit value, then default value, then the midpoint
    pub fn initial_value(&self, range: ValueRange) -> i32 {
        self.value
            .or(self.default_value)
            .map(|v| range.clamp(v))
            .unwrap_or_else(|| range.midpoint())
    }

    /// Check everything that can't be normalized away
    pub fn validate(&self) -> Result<()> {
        self.range()?;
        validate_spring(&self.spring)
    }
}

/// Settle springs must be physical and must not overshoot their tick
pub(crate) fn validate_spring(spring: &SpringConfig) -> Result<()> {
    if spring.is_valid() && spring.is_overshoot_free() {
        return Ok(());
    }
    Err(SliderError::InvalidSpring {
        stiffness: spring.stiffness,
        damping: spring.damping,
        mass: spring.mass,
    })
}

/// Optional notification hooks
///
/// Hooks are fire-and-forget and run synchronously inside the event or frame
/// that completes the interaction.
#[derive(Clone, Default)]
pub struct SliderCallbacks {
    /// Fired once per completed commit, after the committed value is updated
    pub on_change: Option<Arc<dyn Fn(i32) + Send + Sync>>,
    /// Fired once per pointer press that starts a drag
    pub on_drag_start: Option<Arc<dyn Fn() + Send + Sync>>,
    /// Fired once per release whose settle animation completed
    pub on_drag_end: Option<Arc<dyn Fn(i32) + Send + Sync>>,
}

impl SliderCallbacks {
    pub(crate) fn change(&self, value: i32) {
        if let Some(ref cb) = self.on_change {
            cb(value);
        }
    }

    pub(crate) fn drag_start(&self) {
        if let Some(ref cb) = self.on_drag_start {
            cb();
        }
    }

    pub(crate) fn drag_end(&self, value: i32) {
        if let Some(ref cb) = self.on_drag_end {
            cb(value);
        }
    }
}

impl fmt::Debug for SliderCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderCallbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.min, 2);
        assert_eq!(config.max, 10);
        assert!(!config.disabled);
        assert_eq!(config.mode(), ValueMode::Uncontrolled);
        assert_eq!(config.initial_value(config.range().unwrap()), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_value_priority_and_clamp() {
        let range = ValueRange::default();
        let config = SliderConfig {
            value: Some(3),
            default_value: Some(8),
            ..Default::default()
        };
        assert_eq!(config.initial_value(range), 3);
        assert_eq!(config.mode(), ValueMode::Controlled);

        let config = SliderConfig {
            default_value: Some(42),
            ..Default::default()
        };
        assert_eq!(config.initial_value(range), 10);
    }

    #[test]
    fn test_validate_rejects_bad_range_and_spring() {
        let config = SliderConfig {
            min: 10,
            max: 2,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(SliderError::InvalidRange { min: 10, max: 2 })
        );

        let config = SliderConfig {
            spring: SpringConfig::new(100.0, 10.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SliderError::InvalidSpring { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_underdamped_spring() {
        for spring in [
            SpringConfig::new(100.0, 0.0, 1.0),
            SpringConfig::new(400.0, 30.0, 1.0),
        ] {
            let config = SliderConfig {
                spring,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SliderError::InvalidSpring { .. })
            ));
        }

        let config = SliderConfig {
            spring: SpringConfig::new(100.0, 50.0, 1.0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
