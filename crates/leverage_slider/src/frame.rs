//! Render outputs
//!
//! A presentation layer draws the slider from a [`SliderFrame`]; it never
//! reaches into engine state directly.

use smallvec::SmallVec;

use crate::mapper::CoordinateMapper;
use crate::phase::SliderPhase;

/// Affordance flags for the thumb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InteractionFlags {
    /// From pointer down until the release has finished settling
    pub dragging: bool,
    /// Pointer is over the widget
    pub hovering: bool,
}

/// One integer mark on the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: i32,
    /// Offset along the track
    pub position: f32,
    /// `value <= display value`
    pub selected: bool,
}

/// Tick list, inline for typical ranges
pub type Ticks = SmallVec<[Tick; 16]>;

/// Build every tick with its selection state
pub fn ticks(mapper: &CoordinateMapper, display_value: i32) -> Ticks {
    mapper
        .range()
        .values()
        .map(|value| Tick {
            value,
            position: mapper.position_of(value),
            selected: value <= display_value,
        })
        .collect()
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SliderFrame {
    /// The big numeral
    pub display_value: i32,
    /// Last published value
    pub committed_value: i32,
    /// Thumb offset along the track
    pub position: f32,
    /// Thumb offset as a fraction of the track
    pub fraction: f32,
    /// Track length the frame was laid out against
    pub track_length: f32,
    pub flags: InteractionFlags,
    pub phase: SliderPhase,
    pub disabled: bool,
    pub ticks: Ticks,
}

impl SliderFrame {
    /// Number of selected ticks
    pub fn selected_count(&self) -> usize {
        self.ticks.iter().filter(|t| t.selected).count()
    }
}
