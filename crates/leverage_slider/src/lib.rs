//! Leverage Slider
//!
//! A headless leverage selector: an integer slider that tracks the pointer
//! 1:1 while dragging and springs onto the nearest tick when released.
//! Label taps and keyboard steps spring to their value the same way. The
//! engine owns no rendering; hosts feed it input and frame deltas and draw
//! whatever [`SliderFrame`] describes.
//!
//! # Features
//!
//! - **Coordinate Mapping**: Linear value/offset mapping with half-up snapping
//! - **Interaction Phases**: Idle, dragging and settling with explicit transitions
//! - **Settle Animation**: Interruptible critically damped spring per commit
//! - **Controlled Mode**: Owner-supplied values that sync without animation
//! - **Pointer Capture**: Window-level releases finish drags the widget missed
//! - **Accessibility**: AccessKit slider and label nodes
//!
//! # Example
//!
//! ```rust
//! use leverage_platform::{InputEvent, Key, KeyboardEvent};
//! use leverage_slider::prelude::*;
//!
//! let mut slider = LeverageSlider::builder()
//!     .default_value(6)
//!     .build(TrackGeometry::with_length(800.0))
//!     .unwrap();
//!
//! slider.handle_input(&InputEvent::Keyboard(KeyboardEvent::pressed(Key::ArrowRight)));
//! assert_eq!(slider.display_value(), 7);
//! assert_eq!(slider.committed_value(), 6);
//!
//! while slider.tick(1.0 / 60.0) {}
//! assert_eq!(slider.committed_value(), 7);
//! assert_eq!(slider.position(), 500.0);
//! ```

pub mod accessibility;
pub mod capture;
pub mod config;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod phase;
pub mod slider;
pub mod value;

pub use capture::{PointerCapture, PointerCaptureHub};
pub use config::{SliderCallbacks, SliderConfig};
pub use error::{Result, SliderError};
pub use frame::{InteractionFlags, SliderFrame, Tick, Ticks};
pub use mapper::{CoordinateMapper, TrackGeometry, TrackMetrics, ValueRange, FALLBACK_TRACK_LENGTH};
pub use phase::{PhaseEvent, SliderPhase};
pub use slider::{LeverageSlider, SliderBuilder};
pub use value::ValueMode;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::capture::PointerCaptureHub;
    pub use crate::config::{SliderCallbacks, SliderConfig};
    pub use crate::error::{Result, SliderError};
    pub use crate::frame::SliderFrame;
    pub use crate::mapper::{TrackGeometry, TrackMetrics};
    pub use crate::phase::SliderPhase;
    pub use crate::slider::{LeverageSlider, SliderBuilder};
    pub use crate::value::ValueMode;
}
