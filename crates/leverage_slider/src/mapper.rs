//! Coordinate mapping between track pixels and leverage values
//!
//! Everything here is pure arithmetic over a [`ValueRange`] and the most
//! recently measured [`TrackGeometry`]. Positions are local to the track:
//! `0.0` is the `min` end, `track length` is the `max` end.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SliderError};

/// Track length assumed while the track is unmeasured or collapsed
pub const FALLBACK_TRACK_LENGTH: f32 = 300.0;

/// Two-sided clamp that maps NaN to the lower bound
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x.is_nan() {
        lo
    } else {
        x.clamp(lo, hi)
    }
}

/// Inclusive integer range a slider selects from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min: i32,
    max: i32,
}

impl ValueRange {
    /// Create a range; `min` must be strictly less than `max`
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min >= max {
            return Err(SliderError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of unit intervals between `min` and `max`
    pub fn steps(&self) -> u32 {
        (i64::from(self.max) - i64::from(self.min)) as u32
    }

    /// Number of integer ticks, `steps + 1`
    pub fn tick_count(&self) -> usize {
        self.steps() as usize + 1
    }

    /// Every integer in the range, ascending
    pub fn values(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// The integer nearest the middle of the range
    pub fn midpoint(&self) -> i32 {
        let mid = (f64::from(self.min) + f64::from(self.max)) / 2.0;
        self.snap_f64(mid)
    }

    /// Quantize a continuous value to the nearest in-range integer
    ///
    /// Ties round up (`5.5 -> 6`, `-2.5 -> -2`). NaN and negative infinity
    /// land on `min`, positive infinity on `max`.
    pub fn snap(&self, value: f32) -> i32 {
        self.snap_f64(f64::from(value))
    }

    fn snap_f64(&self, value: f64) -> i32 {
        if value.is_nan() {
            return self.min;
        }
        let rounded = (value + 0.5).floor();
        rounded.clamp(f64::from(self.min), f64::from(self.max)) as i32
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 2, max: 10 }
    }
}

/// Measured placement of the track on the host surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TrackGeometry {
    /// Surface coordinate of the track's `min` end
    pub origin: f32,
    /// Track length in pixels
    pub length: f32,
}

impl TrackGeometry {
    pub fn new(origin: f32, length: f32) -> Self {
        Self { origin, length }
    }

    /// A track starting at the surface origin
    pub fn with_length(length: f32) -> Self {
        Self::new(0.0, length)
    }

    /// Whether layout has produced a usable length
    pub fn is_measured(&self) -> bool {
        self.length.is_finite() && self.length > 0.0
    }

    /// Length used for mapping, falling back when unmeasured
    pub fn effective_length(&self) -> f32 {
        if self.is_measured() {
            self.length
        } else {
            FALLBACK_TRACK_LENGTH
        }
    }

    /// Convert a surface coordinate to an offset along the track
    pub fn to_local(&self, x: f32) -> f32 {
        if self.origin.is_finite() {
            x - self.origin
        } else {
            x
        }
    }

    /// Clamp a local offset onto the track
    pub fn clamp_local(&self, offset: f32) -> f32 {
        clamp(offset, 0.0, self.effective_length())
    }
}

/// Source of fresh track geometry
///
/// Engines re-query this whenever layout may have moved (pointer down,
/// commit, resize) instead of caching one measurement forever. Returning
/// `None` means the track is not laid out yet.
pub trait TrackMetrics {
    fn measure(&self) -> Option<TrackGeometry>;
}

impl TrackMetrics for TrackGeometry {
    fn measure(&self) -> Option<TrackGeometry> {
        Some(*self)
    }
}

impl<F> TrackMetrics for F
where
    F: Fn() -> Option<TrackGeometry>,
{
    fn measure(&self) -> Option<TrackGeometry> {
        self()
    }
}

/// Bidirectional mapping between track offsets and range values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    range: ValueRange,
    geometry: TrackGeometry,
}

impl CoordinateMapper {
    pub fn new(range: ValueRange, geometry: TrackGeometry) -> Self {
        Self { range, geometry }
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    /// Track length used for mapping (never zero)
    pub fn track_length(&self) -> f32 {
        self.geometry.effective_length()
    }

    /// Domain value -> track offset
    pub fn value_to_position(&self, value: f32) -> f32 {
        let steps = self.range.steps() as f32;
        (value - self.range.min as f32) / steps * self.track_length()
    }

    /// Track offset -> continuous domain value (not clamped)
    pub fn position_to_value(&self, position: f32) -> f32 {
        let steps = self.range.steps() as f32;
        self.range.min as f32 + position / self.track_length() * steps
    }

    /// Offset of an integer value's tick
    pub fn position_of(&self, value: i32) -> f32 {
        self.value_to_position(value as f32)
    }

    pub fn snap(&self, value: f32) -> i32 {
        self.range.snap(value)
    }

    /// Clamp a local offset onto the track
    pub fn clamp_position(&self, position: f32) -> f32 {
        self.geometry.clamp_local(position)
    }

    /// Convert a surface coordinate to a clamped track offset
    pub fn locate(&self, surface_x: f32) -> f32 {
        self.clamp_position(self.geometry.to_local(surface_x))
    }

    /// The integer a clamped track offset selects
    pub fn value_at(&self, position: f32) -> i32 {
        self.snap(self.position_to_value(self.clamp_position(position)))
    }

    /// Offset as a fraction of the track, in `[0, 1]`
    pub fn fraction(&self, position: f32) -> f32 {
        clamp(position / self.track_length(), 0.0, 1.0)
    }
}
