//! Session file handling
//!
//! A session file (`leverage.toml`) describes one slider, the track it is
//! laid out on, the frame clock, and a script of input steps to replay:
//!
//! ```toml
//! [slider]
//! min = 2
//! max = 10
//!
//! [track]
//! length = 800.0
//!
//! [[steps]]
//! action = "pointer_down"
//! x = 400.0
//! ```

use anyhow::{Context, Result};
use leverage_platform::Key;
use leverage_slider::{SliderConfig, TrackGeometry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A scripted slider session
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub track: TrackConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// Track layout in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TrackConfig {
    #[serde(default)]
    pub origin: f32,
    #[serde(default = "default_length")]
    pub length: f32,
}

fn default_length() -> f32 {
    800.0
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            origin: 0.0,
            length: default_length(),
        }
    }
}

impl TrackConfig {
    pub fn geometry(&self) -> TrackGeometry {
        TrackGeometry::new(self.origin, self.length)
    }
}

/// Fixed-step frame clock settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ClockConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Upper bound on frames a `settle` step may run
    #[serde(default = "default_max_frames_per_wait")]
    pub max_frames_per_wait: u32,
}

fn default_fps() -> u32 {
    60
}

fn default_max_frames_per_wait() -> u32 {
    600
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_frames_per_wait: default_max_frames_per_wait(),
        }
    }
}

/// One scripted input
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    PointerDown { x: f32 },
    PointerMove { x: f32 },
    PointerUp,
    PointerCancel,
    /// Pointer released somewhere else in the window
    GlobalPointerUp,
    Hover { inside: bool },
    Tap { value: i32 },
    /// Key press by name ("ArrowRight", "Home", ...)
    Key { key: String },
    /// Owner pushes a value (controlled sliders)
    SetValue { value: i32 },
    Resize { length: f32 },
    Disable { disabled: bool },
    /// Advance a fixed number of frames
    Wait { frames: u32 },
    /// Advance frames until the slider is idle
    Settle,
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptStep::PointerDown { x } => write!(f, "pointer down @ {:.1}", x),
            ScriptStep::PointerMove { x } => write!(f, "pointer move @ {:.1}", x),
            ScriptStep::PointerUp => write!(f, "pointer up"),
            ScriptStep::PointerCancel => write!(f, "pointer cancel"),
            ScriptStep::GlobalPointerUp => write!(f, "global pointer up"),
            ScriptStep::Hover { inside: true } => write!(f, "hover enter"),
            ScriptStep::Hover { inside: false } => write!(f, "hover leave"),
            ScriptStep::Tap { value } => write!(f, "tap label {}", value),
            ScriptStep::Key { key } => write!(f, "key {}", key),
            ScriptStep::SetValue { value } => write!(f, "set value {}", value),
            ScriptStep::Resize { length } => write!(f, "resize to {:.1}", length),
            ScriptStep::Disable { disabled: true } => write!(f, "disable"),
            ScriptStep::Disable { disabled: false } => write!(f, "enable"),
            ScriptStep::Wait { frames } => write!(f, "wait {} frames", frames),
            ScriptStep::Settle => write!(f, "settle"),
        }
    }
}

impl SessionConfig {
    /// Load a session from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check everything the replay would otherwise trip over
    pub fn validate(&self) -> Result<()> {
        self.slider.validate()?;

        if self.clock.fps == 0 {
            anyhow::bail!("clock.fps must be greater than zero");
        }
        if !self.track.length.is_finite() || self.track.length < 0.0 {
            anyhow::bail!("track.length must be a finite, non-negative number");
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                ScriptStep::Key { key } if Key::from_name(key) == Key::Unidentified => {
                    anyhow::bail!("step {}: unknown key '{}'", index + 1, key);
                }
                ScriptStep::Resize { length } if !length.is_finite() || *length < 0.0 => {
                    anyhow::bail!("step {}: invalid track length {}", index + 1, length);
                }
                ScriptStep::SetValue { .. } if self.slider.value.is_none() => {
                    anyhow::bail!(
                        "step {}: set_value needs a controlled slider (set slider.value)",
                        index + 1
                    );
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// A drag, a tap, and a couple of key presses on the default slider
    pub fn sample() -> Self {
        Self {
            slider: SliderConfig {
                default_value: Some(6),
                label: Some("Leverage".to_string()),
                ..SliderConfig::default()
            },
            track: TrackConfig::default(),
            clock: ClockConfig::default(),
            steps: vec![
                ScriptStep::Hover { inside: true },
                ScriptStep::PointerDown { x: 400.0 },
                ScriptStep::PointerMove { x: 130.0 },
                ScriptStep::PointerUp,
                ScriptStep::Settle,
                ScriptStep::Tap { value: 8 },
                ScriptStep::Wait { frames: 4 },
                ScriptStep::Key {
                    key: "ArrowRight".to_string(),
                },
                ScriptStep::Settle,
                ScriptStep::Key {
                    key: "Home".to_string(),
                },
                ScriptStep::Settle,
            ],
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize session")
    }
}
