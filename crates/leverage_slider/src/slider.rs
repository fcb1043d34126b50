//! Leverage slider engine
//!
//! A headless integer slider driven by pointer drags, label taps and
//! keyboard steps. Raw pointer tracking is applied 1:1 with no animation;
//! every commit (release, tap, key) springs the thumb onto its tick and only
//! publishes the value once the spring has settled.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use leverage_slider::{LeverageSlider, TrackGeometry};
//!
//! let changes = Arc::new(Mutex::new(Vec::new()));
//! let sink = changes.clone();
//!
//! let mut slider = LeverageSlider::builder()
//!     .min(2)
//!     .max(10)
//!     .on_change(move |v| sink.lock().unwrap().push(v))
//!     .build(TrackGeometry::with_length(800.0))
//!     .unwrap();
//!
//! slider.pointer_down(100.0);
//! assert_eq!(slider.display_value(), 3);
//! slider.pointer_up();
//!
//! // The commit lands once the settle animation finishes
//! while slider.tick(1.0 / 60.0) {}
//! assert_eq!(slider.committed_value(), 3);
//! assert_eq!(*changes.lock().unwrap(), vec![3]);
//! ```

use std::fmt;
use std::sync::Arc;

use accesskit::{Action, Node};
use leverage_animation::{AnimatedValue, SpringConfig};
use leverage_platform::{InputEvent, Key, KeyboardEvent, PointerEvent};
use tracing::{debug, trace, warn};

use crate::accessibility::{self, SliderSemantics};
use crate::capture::{PointerCapture, PointerCaptureHub};
use crate::config::{validate_spring, SliderCallbacks, SliderConfig};
use crate::error::Result;
use crate::frame::{self, InteractionFlags, SliderFrame, Ticks};
use crate::mapper::{clamp, CoordinateMapper, TrackGeometry, TrackMetrics, ValueRange};
use crate::phase::{PhaseEvent, SliderPhase};
use crate::value::{CommittedValue, ValueMode};

/// Longest frame step fed to the settle spring
const MAX_FRAME_DELTA: f32 = 1.0 / 30.0;

/// Headless leverage slider
pub struct LeverageSlider {
    mapper: CoordinateMapper,
    metrics: Box<dyn TrackMetrics>,
    committed: CommittedValue,
    /// The numeral on screen; leads `committed` during interactions
    display: i32,
    /// Thumb offset along the track
    position: AnimatedValue,
    phase: SliderPhase,
    hovering: bool,
    disabled: bool,
    value_suffix: String,
    label: Option<String>,
    callbacks: SliderCallbacks,
    capture_hub: Option<PointerCaptureHub>,
    /// Held exactly while `phase` is `Dragging`
    capture: Option<PointerCapture>,
}

impl LeverageSlider {
    /// Start building a slider
    pub fn builder() -> SliderBuilder {
        SliderBuilder::new()
    }

    /// Create a slider from a configuration, without callbacks
    pub fn new(config: SliderConfig, metrics: impl TrackMetrics + 'static) -> Result<Self> {
        SliderBuilder::from_config(config).build(metrics)
    }

    fn from_builder(builder: SliderBuilder, metrics: Box<dyn TrackMetrics>) -> Result<Self> {
        let SliderBuilder {
            config,
            callbacks,
            capture_hub,
        } = builder;

        config.validate()?;
        let range = config.range()?;
        let geometry = metrics.measure().unwrap_or_default();
        let mapper = CoordinateMapper::new(range, geometry);
        let initial = config.initial_value(range);
        let mode = config.mode();

        debug!(
            "LeverageSlider: range {}..={}, initial {}, {:?}, track {:.1}px",
            range.min(),
            range.max(),
            initial,
            mode,
            mapper.track_length()
        );

        Ok(Self {
            mapper,
            metrics,
            committed: CommittedValue::new(mode, initial),
            display: initial,
            position: AnimatedValue::new(mapper.position_of(initial), config.spring),
            phase: SliderPhase::Idle,
            hovering: false,
            disabled: config.disabled,
            value_suffix: config.value_suffix,
            label: config.label,
            callbacks,
            capture_hub,
            capture: None,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn range(&self) -> ValueRange {
        self.mapper.range()
    }

    /// Geometry the slider is currently mapping against
    pub fn geometry(&self) -> TrackGeometry {
        self.mapper.geometry()
    }

    pub fn mode(&self) -> ValueMode {
        self.committed.mode()
    }

    pub fn phase(&self) -> SliderPhase {
        self.phase
    }

    /// The externally visible value
    pub fn committed_value(&self) -> i32 {
        self.committed.get()
    }

    /// The value currently shown, ahead of the committed value mid-interaction
    pub fn display_value(&self) -> i32 {
        self.display
    }

    /// Rendered thumb offset along the track
    pub fn position(&self) -> f32 {
        self.position.get()
    }

    /// Offset the thumb is heading for
    pub fn target_position(&self) -> f32 {
        self.position.target()
    }

    pub fn flags(&self) -> InteractionFlags {
        InteractionFlags {
            dragging: self.phase.shows_drag(),
            hovering: self.hovering,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether a settle animation is in flight
    pub fn is_animating(&self) -> bool {
        self.phase.is_settling()
    }

    /// Whether the host should keep scheduling frames
    ///
    /// True while settling, and while a drag holds a pointer capture so a
    /// window-level release is observed on the next frame.
    pub fn needs_frame(&self) -> bool {
        self.phase.is_settling() || self.capture.is_some()
    }

    /// `value` with the configured suffix ("6x")
    pub fn format_value(&self, value: i32) -> String {
        format!("{}{}", value, self.value_suffix)
    }

    pub fn ticks(&self) -> Ticks {
        frame::ticks(&self.mapper, self.display)
    }

    /// Snapshot for the presentation layer
    pub fn frame(&self) -> SliderFrame {
        let position = self.position.get();
        SliderFrame {
            display_value: self.display,
            committed_value: self.committed.get(),
            position,
            fraction: self.mapper.fraction(position),
            track_length: self.mapper.track_length(),
            flags: self.flags(),
            phase: self.phase,
            disabled: self.disabled,
            ticks: self.ticks(),
        }
    }

    // =========================================================================
    // Input dispatch
    // =========================================================================

    /// Route a platform input event
    ///
    /// Returns `true` when the event changed slider state.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Keyboard(key) => self.handle_key(key),
        }
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match *event {
            PointerEvent::Down { x, .. } => self.pointer_down(x),
            PointerEvent::Moved { x, .. } => self.pointer_move(x),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Cancelled => self.pointer_cancel(),
            PointerEvent::Entered => self.set_hovering(true),
            PointerEvent::Left => self.set_hovering(false),
        }
    }

    /// Arrow keys step by one, Home/End jump to the ends; other keys are ignored
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        if !event.is_press() {
            return false;
        }

        match event.key {
            Key::ArrowRight | Key::ArrowUp => self.step_by(1),
            Key::ArrowLeft | Key::ArrowDown => self.step_by(-1),
            Key::Home => self.jump_to(self.range().min()),
            Key::End => self.jump_to(self.range().max()),
            _ => false,
        }
    }

    /// Handle an assistive-technology action on the label node for `value`
    pub fn perform_label_action(&mut self, value: i32, action: Action) -> bool {
        match action {
            Action::Click => self.tap_label(value),
            _ => false,
        }
    }

    /// Handle an assistive-technology action on the slider node
    pub fn perform_action(&mut self, action: Action) -> bool {
        match action {
            Action::Increment => self.step_by(1),
            Action::Decrement => self.step_by(-1),
            _ => false,
        }
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Press at surface coordinate `x`
    pub fn pointer_down(&mut self, x: f32) -> bool {
        if self.disabled {
            return false;
        }
        self.poll_capture();

        if self.phase.is_settling() {
            self.finish_settle();
        }
        let Some(next) = self.phase.on_event(PhaseEvent::PointerDown) else {
            return false;
        };

        self.remeasure();
        let position = self.mapper.locate(x);
        self.position.set_immediate(position);
        self.display = self.mapper.value_at(position);
        self.phase = next;
        self.capture = self.capture_hub.as_ref().map(PointerCaptureHub::acquire);

        debug!(
            "LeverageSlider: drag start at {:.1}px -> {}",
            position, self.display
        );
        self.callbacks.drag_start();
        true
    }

    /// Pointer moved to surface coordinate `x`
    pub fn pointer_move(&mut self, x: f32) -> bool {
        if self.disabled || !self.phase.is_dragging() {
            return false;
        }
        if self.poll_capture() {
            return true;
        }

        let position = self.mapper.locate(x);
        self.position.set_immediate(position);
        self.display = self.mapper.value_at(position);
        trace!("LeverageSlider: drag {:.1}px -> {}", position, self.display);
        true
    }

    /// Pointer released on the widget
    pub fn pointer_up(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.release()
    }

    /// Pointer taken away by the platform (capture lost)
    pub fn pointer_cancel(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        debug!("LeverageSlider: pointer cancelled");
        self.release()
    }

    /// Pointer released anywhere in the window
    ///
    /// Hosts without a [`PointerCaptureHub`] call this directly from their
    /// window-level release handler. A no-op unless a drag is in progress.
    pub fn global_pointer_up(&mut self) -> bool {
        self.release()
    }

    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        if self.disabled || self.hovering == hovering {
            return false;
        }
        self.hovering = hovering;
        true
    }

    /// Finalize a drag if the capture hub saw a release we didn't
    fn poll_capture(&mut self) -> bool {
        let released = self
            .capture
            .as_ref()
            .is_some_and(PointerCapture::is_released);
        if released && self.phase.is_dragging() {
            debug!("LeverageSlider: release observed outside the widget");
            return self.release();
        }
        false
    }

    fn release(&mut self) -> bool {
        let Some(next) = self.phase.on_event(PhaseEvent::Release) else {
            return false;
        };

        self.phase = next;
        self.capture = None;
        let target = self.mapper.position_of(self.display);
        self.position.set_target(target);

        debug!(
            "LeverageSlider: release at {:.1}px, settling to {} ({:.1}px)",
            self.position.get(),
            self.display,
            target
        );
        true
    }

    // =========================================================================
    // Taps and keys
    // =========================================================================

    /// Activate the label for `value`
    ///
    /// Out-of-range values are clamped. Ignored mid-drag.
    pub fn tap_label(&mut self, value: i32) -> bool {
        if self.disabled || self.phase.is_dragging() {
            return false;
        }
        let value = self.range().clamp(value);
        self.commit_to(value)
    }

    fn step_by(&mut self, delta: i32) -> bool {
        let next = self.range().clamp(self.display.saturating_add(delta));
        self.jump_to(next)
    }

    fn jump_to(&mut self, value: i32) -> bool {
        if self.disabled || self.phase.is_dragging() {
            return false;
        }
        if value == self.display {
            trace!("LeverageSlider: already at {}, key ignored", value);
            return false;
        }
        self.commit_to(value)
    }

    fn commit_to(&mut self, value: i32) -> bool {
        let Some(next) = self.phase.on_event(PhaseEvent::Commit) else {
            return false;
        };

        self.remeasure();
        self.phase = next;
        self.display = value;
        self.position.set_target(self.mapper.position_of(value));

        debug!("LeverageSlider: settling to {}", value);
        true
    }

    // =========================================================================
    // External changes
    // =========================================================================

    /// Push the owner's value into a controlled slider
    ///
    /// Takes effect immediately, with no animation, unless a drag is in
    /// progress; a drag keeps the display until it is released. Ignored on
    /// uncontrolled sliders.
    pub fn set_value(&mut self, value: i32) -> bool {
        if self.committed.mode() != ValueMode::Controlled {
            warn!(
                "LeverageSlider: set_value({}) ignored on an uncontrolled slider",
                value
            );
            return false;
        }

        let value = self.range().clamp(value);
        let owner_changed = self.committed.set_external(value);

        let Some(next) = self.phase.on_event(PhaseEvent::Override) else {
            debug!(
                "LeverageSlider: owner value {} recorded, drag keeps the display",
                value
            );
            return owner_changed;
        };

        let target = self.mapper.position_of(value);
        let in_sync = self.phase.is_idle()
            && self.display == value
            && !self.position.is_animating()
            && self.position.get() == target;

        self.phase = next;
        self.display = value;
        self.position.set_immediate(target);

        if !in_sync {
            debug!("LeverageSlider: owner value {} applied", value);
        }
        owner_changed || !in_sync
    }

    /// Track layout changed; re-measure and re-place the thumb
    ///
    /// Ignored while dragging. A settle in flight keeps animating toward the
    /// re-measured target.
    pub fn resize(&mut self) -> bool {
        if self.phase.is_dragging() {
            return false;
        }

        self.remeasure();
        let target = self.mapper.position_of(self.display);
        if self.phase.is_settling() {
            self.position.set_target(target);
        } else {
            self.position.set_immediate(target);
        }

        debug!(
            "LeverageSlider: resized to {:.1}px",
            self.mapper.track_length()
        );
        true
    }

    /// Enable or disable input
    ///
    /// Disabling mid-drag releases the drag first so it can still settle.
    pub fn set_disabled(&mut self, disabled: bool) -> bool {
        if self.disabled == disabled {
            return false;
        }
        if disabled {
            self.release();
            self.hovering = false;
        }
        self.disabled = disabled;
        true
    }

    /// Replace the settle spring; an in-flight settle keeps its motion
    ///
    /// Springs that would overshoot are rejected and the current one kept.
    pub fn set_spring(&mut self, config: SpringConfig) -> Result<()> {
        validate_spring(&config)?;
        self.position.set_config(config);
        Ok(())
    }

    fn remeasure(&mut self) {
        match self.metrics.measure() {
            Some(geometry) => self.mapper.set_geometry(geometry),
            None => trace!("LeverageSlider: track not laid out, keeping last geometry"),
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance the settle animation by `dt` seconds
    ///
    /// Returns [`needs_frame`](Self::needs_frame). The frame on which the
    /// settle completes publishes the commit and returns `false`.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.poll_capture();

        if !self.phase.is_settling() {
            return self.needs_frame();
        }

        let dt = clamp(dt, 0.0, MAX_FRAME_DELTA);
        if self.position.step(dt) {
            trace!("LeverageSlider: frame at {:.2}px", self.position.get());
            return true;
        }

        self.finish_settle();
        false
    }

    fn finish_settle(&mut self) {
        let SliderPhase::Settling { after_release } = self.phase else {
            return;
        };
        let Some(next) = self.phase.on_event(PhaseEvent::Settled) else {
            return;
        };

        self.position.snap_to_target();
        self.phase = next;

        let value = self.display;
        self.committed.commit(value);
        debug!("LeverageSlider: committed {}", value);

        self.callbacks.change(value);
        if after_release {
            self.callbacks.drag_end(value);
        }
    }

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// The `Role::Slider` node for the interactive region
    pub fn accessibility_node(&self) -> Node {
        let value_text = self.format_value(self.display);
        let range = self.range();
        accessibility::slider_node(SliderSemantics {
            min: range.min(),
            max: range.max(),
            value: self.display,
            value_text: &value_text,
            label: self.label.as_deref(),
            disabled: self.disabled,
        })
    }

    /// One activatable node per integer label, ascending
    pub fn label_nodes(&self) -> Vec<(i32, Node)> {
        self.range()
            .values()
            .map(|value| {
                let text = self.format_value(value);
                let node = accessibility::label_node(&text, value == self.display, self.disabled);
                (value, node)
            })
            .collect()
    }
}

impl fmt::Debug for LeverageSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeverageSlider")
            .field("mapper", &self.mapper)
            .field("committed", &self.committed)
            .field("display", &self.display)
            .field("position", &self.position)
            .field("phase", &self.phase)
            .field("hovering", &self.hovering)
            .field("disabled", &self.disabled)
            .field("callbacks", &self.callbacks)
            .field("captured", &self.capture.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for creating LeverageSlider engines with fluent API
#[derive(Debug, Default)]
pub struct SliderBuilder {
    config: SliderConfig,
    callbacks: SliderCallbacks,
    capture_hub: Option<PointerCaptureHub>,
}

impl SliderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: SliderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Make the slider controlled, starting at `value`
    pub fn value(mut self, value: i32) -> Self {
        self.config.value = Some(value);
        self
    }

    /// Starting value for an uncontrolled slider
    pub fn default_value(mut self, value: i32) -> Self {
        self.config.default_value = Some(value);
        self
    }

    /// Set the minimum value (default: 2)
    pub fn min(mut self, min: i32) -> Self {
        self.config.min = min;
        self
    }

    /// Set the maximum value (default: 10)
    pub fn max(mut self, max: i32) -> Self {
        self.config.max = max;
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Set the settle spring
    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.config.spring = spring;
        self
    }

    /// Suffix shown after the value (default: "x")
    pub fn value_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.value_suffix = suffix.into();
        self
    }

    /// Accessible name
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    /// Subscribe drags to window-level releases through `hub`
    pub fn capture_hub(mut self, hub: &PointerCaptureHub) -> Self {
        self.capture_hub = Some(hub.clone());
        self
    }

    /// Set the change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.callbacks.on_change = Some(Arc::new(callback));
        self
    }

    /// Set the drag-start callback
    pub fn on_drag_start<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callbacks.on_drag_start = Some(Arc::new(callback));
        self
    }

    /// Set the drag-end callback
    pub fn on_drag_end<F>(mut self, callback: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.callbacks.on_drag_end = Some(Arc::new(callback));
        self
    }

    /// Build the slider against a source of track geometry
    pub fn build(self, metrics: impl TrackMetrics + 'static) -> Result<LeverageSlider> {
        LeverageSlider::from_builder(self, Box::new(metrics))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Mutex;

    use accesskit::Role;

    use super::*;
    use crate::error::SliderError;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Fired {
        Change(i32),
        DragStart,
        DragEnd(i32),
    }

    type Log = Arc<Mutex<Vec<Fired>>>;

    fn recording(builder: SliderBuilder) -> (SliderBuilder, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let builder = builder
            .on_change(move |v| a.lock().unwrap().push(Fired::Change(v)))
            .on_drag_start(move || b.lock().unwrap().push(Fired::DragStart))
            .on_drag_end(move |v| c.lock().unwrap().push(Fired::DragEnd(v)));
        (builder, log)
    }

    fn fired(log: &Log) -> Vec<Fired> {
        log.lock().unwrap().clone()
    }

    fn settle(slider: &mut LeverageSlider) -> usize {
        let mut frames = 0;
        while slider.tick(DT) {
            frames += 1;
            assert!(frames < 600, "settle never finished");
        }
        frames
    }

    fn track_800() -> TrackGeometry {
        TrackGeometry::with_length(800.0)
    }

    #[test]
    fn test_drag_release_commits_once() {
        let (builder, log) = recording(LeverageSlider::builder().min(2).max(10));
        let mut slider = builder.build(track_800()).unwrap();

        assert!(slider.pointer_down(400.0));
        assert_eq!(slider.display_value(), 6);
        assert!(slider.flags().dragging);
        assert_eq!(fired(&log), vec![Fired::DragStart]);

        assert!(slider.pointer_up());
        assert_eq!(slider.target_position(), 400.0);
        assert!(slider.is_animating());

        assert!(!slider.tick(DT));
        assert_eq!(slider.phase(), SliderPhase::Idle);
        assert_eq!(slider.committed_value(), 6);
        assert_eq!(
            fired(&log),
            vec![Fired::DragStart, Fired::Change(6), Fired::DragEnd(6)]
        );

        // Nothing more once idle
        assert!(!slider.tick(DT));
        assert_eq!(fired(&log).len(), 3);
    }

    #[test]
    fn test_drag_tracks_pointer_then_springs_to_tick() {
        let (builder, log) = recording(LeverageSlider::builder().default_value(6));
        let mut slider = builder.build(track_800()).unwrap();

        slider.pointer_down(400.0);
        assert!(slider.pointer_move(130.0));
        assert_eq!(slider.position(), 130.0);
        assert_eq!(slider.display_value(), 3);

        // Pointer outside the track clamps to the ends
        slider.pointer_move(-50.0);
        assert_eq!(slider.position(), 0.0);
        assert_eq!(slider.display_value(), 2);
        slider.pointer_move(130.0);

        slider.pointer_up();
        assert_eq!(slider.target_position(), 100.0);
        assert_eq!(slider.committed_value(), 6);
        assert!(slider.flags().dragging);

        let frames = settle(&mut slider);
        assert!(frames > 0);
        assert_eq!(slider.position(), 100.0);
        assert_eq!(slider.committed_value(), 3);
        assert!(!slider.flags().dragging);
        assert_eq!(
            fired(&log),
            vec![Fired::DragStart, Fired::Change(3), Fired::DragEnd(3)]
        );
    }

    #[test]
    fn test_controlled_sync_is_immediate() {
        let (builder, log) = recording(LeverageSlider::builder().value(6));
        let mut slider = builder.build(track_800()).unwrap();
        assert_eq!(slider.mode(), ValueMode::Controlled);
        assert_eq!(slider.position(), 400.0);

        assert!(slider.set_value(9));
        assert_eq!(slider.display_value(), 9);
        assert_eq!(slider.committed_value(), 9);
        assert_eq!(slider.position(), 700.0);
        assert!(!slider.is_animating());
        assert!(!slider.tick(DT));
        assert!(fired(&log).is_empty());

        // Same value again is a no-op
        assert!(!slider.set_value(9));
        // Out-of-range owner values clamp
        slider.set_value(42);
        assert_eq!(slider.display_value(), 10);
    }

    #[test]
    fn test_controlled_commit_waits_for_owner() {
        let (builder, log) = recording(LeverageSlider::builder().value(6));
        let mut slider = builder.build(track_800()).unwrap();

        assert!(slider.tap_label(8));
        settle(&mut slider);
        assert_eq!(fired(&log), vec![Fired::Change(8)]);
        assert_eq!(slider.display_value(), 8);
        assert_eq!(slider.committed_value(), 6);

        slider.set_value(8);
        assert_eq!(slider.committed_value(), 8);
        assert_eq!(slider.position(), 600.0);
    }

    #[test]
    fn test_uncontrolled_ignores_set_value() {
        let mut slider = LeverageSlider::builder()
            .default_value(4)
            .build(track_800())
            .unwrap();
        assert!(!slider.set_value(9));
        assert_eq!(slider.display_value(), 4);
        assert_eq!(slider.committed_value(), 4);
    }

    #[test]
    fn test_keyboard_steps_and_boundaries() {
        let (builder, log) = recording(LeverageSlider::builder().default_value(10));
        let mut slider = builder.build(track_800()).unwrap();

        let right = InputEvent::Keyboard(KeyboardEvent::pressed(Key::ArrowRight));
        let end = InputEvent::Keyboard(KeyboardEvent::pressed(Key::End));
        assert!(!slider.handle_input(&right));
        assert!(!slider.handle_input(&end));
        assert!(!slider.is_animating());
        assert!(!slider.tick(DT));
        assert!(fired(&log).is_empty());

        let release = InputEvent::Keyboard(KeyboardEvent::released(Key::ArrowLeft));
        assert!(!slider.handle_input(&release));

        assert!(slider.handle_key(&KeyboardEvent::pressed(Key::ArrowLeft)));
        assert!(slider.handle_key(&KeyboardEvent::pressed(Key::ArrowDown)));
        assert_eq!(slider.display_value(), 8);
        settle(&mut slider);
        assert_eq!(slider.committed_value(), 8);
        assert_eq!(fired(&log), vec![Fired::Change(8)]);

        assert!(slider.handle_key(&KeyboardEvent::pressed(Key::Home)));
        settle(&mut slider);
        assert_eq!(slider.committed_value(), 2);
        assert!(!slider.handle_key(&KeyboardEvent::pressed(Key::Home)));
        assert!(!slider.handle_key(&KeyboardEvent::pressed(Key::Tab)));
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let (builder, log) = recording(LeverageSlider::builder().disabled(true));
        let mut slider = builder.build(track_800()).unwrap();

        assert!(!slider.pointer_down(100.0));
        assert!(!slider.pointer_move(200.0));
        assert!(!slider.pointer_up());
        assert!(!slider.tap_label(3));
        assert!(!slider.handle_key(&KeyboardEvent::pressed(Key::ArrowLeft)));
        assert!(!slider.set_hovering(true));
        assert!(!slider.perform_action(Action::Increment));

        assert_eq!(slider.phase(), SliderPhase::Idle);
        assert_eq!(slider.display_value(), 6);
        assert!(fired(&log).is_empty());
    }

    #[test]
    fn test_disabling_mid_drag_releases() {
        let (builder, log) = recording(LeverageSlider::builder());
        let mut slider = builder.build(track_800()).unwrap();

        slider.set_hovering(true);
        slider.pointer_down(700.0);
        assert!(slider.set_disabled(true));
        assert!(slider.is_animating());
        assert!(!slider.flags().hovering);

        settle(&mut slider);
        assert_eq!(slider.committed_value(), 9);
        assert_eq!(
            fired(&log),
            vec![Fired::DragStart, Fired::Change(9), Fired::DragEnd(9)]
        );
    }

    #[test]
    fn test_global_release_unsticks_drag() {
        let hub = PointerCaptureHub::new();
        let (builder, log) = recording(LeverageSlider::builder().capture_hub(&hub));
        let mut slider = builder.build(track_800()).unwrap();

        slider.pointer_down(200.0);
        assert_eq!(hub.active_count(), 1);

        // Release lands outside the widget
        assert_eq!(hub.dispatch_global_release(), 1);
        assert!(slider.phase().is_dragging());

        settle(&mut slider);
        assert_eq!(slider.phase(), SliderPhase::Idle);
        assert_eq!(hub.active_count(), 0);
        assert_eq!(
            fired(&log),
            vec![Fired::DragStart, Fired::Change(4), Fired::DragEnd(4)]
        );

        // A second global release finds nothing to finish
        assert_eq!(hub.dispatch_global_release(), 0);
        assert!(!slider.global_pointer_up());
    }

    #[test]
    fn test_global_release_seen_by_next_move() {
        let hub = PointerCaptureHub::new();
        let mut slider = LeverageSlider::builder()
            .capture_hub(&hub)
            .build(track_800())
            .unwrap();

        slider.pointer_down(200.0);
        hub.dispatch_global_release();
        assert!(slider.pointer_move(700.0));
        assert_eq!(slider.display_value(), 4);
        assert!(slider.is_animating());
    }

    #[test]
    fn test_pointer_cancel_finalizes() {
        let mut slider = LeverageSlider::builder().build(track_800()).unwrap();
        slider.pointer_down(800.0);
        assert!(slider.handle_pointer(&PointerEvent::Cancelled));
        settle(&mut slider);
        assert_eq!(slider.committed_value(), 10);
    }

    #[test]
    fn test_commits_retarget_during_settle() {
        let (builder, log) = recording(LeverageSlider::builder());
        let mut slider = builder.build(track_800()).unwrap();

        slider.tap_label(10);
        for _ in 0..3 {
            slider.tick(DT);
        }
        let mid = slider.position();
        assert!(mid > 400.0 && mid < 800.0);

        slider.tap_label(3);
        assert_eq!(slider.target_position(), 100.0);
        settle(&mut slider);

        assert_eq!(slider.committed_value(), 3);
        assert_eq!(fired(&log), vec![Fired::Change(3)]);
    }

    #[test]
    fn test_label_tap_on_current_value_still_publishes() {
        let (builder, log) = recording(LeverageSlider::builder());
        let mut slider = builder.build(track_800()).unwrap();

        assert!(slider.tap_label(6));
        assert!(!slider.tick(DT));
        assert_eq!(fired(&log), vec![Fired::Change(6)]);
    }

    #[test]
    fn test_pointer_down_flushes_pending_settle() {
        let (builder, log) = recording(LeverageSlider::builder());
        let mut slider = builder.build(track_800()).unwrap();

        slider.tap_label(9);
        slider.tick(DT);
        assert!(slider.pointer_down(0.0));

        assert_eq!(slider.committed_value(), 9);
        assert_eq!(slider.display_value(), 2);
        assert_eq!(fired(&log), vec![Fired::Change(9), Fired::DragStart]);
    }

    #[test]
    fn test_taps_ignored_while_dragging() {
        let mut slider = LeverageSlider::builder().build(track_800()).unwrap();
        slider.pointer_down(100.0);
        assert!(!slider.tap_label(9));
        assert!(!slider.handle_key(&KeyboardEvent::pressed(Key::End)));
        assert_eq!(slider.display_value(), 3);
    }

    #[test]
    fn test_override_cancels_settle() {
        let (builder, log) = recording(LeverageSlider::builder().value(6));
        let mut slider = builder.build(track_800()).unwrap();

        slider.tap_label(9);
        slider.tick(DT);
        assert!(slider.set_value(4));

        assert_eq!(slider.phase(), SliderPhase::Idle);
        assert_eq!(slider.display_value(), 4);
        assert_eq!(slider.position(), 200.0);
        assert!(!slider.tick(DT));
        assert!(fired(&log).is_empty());
    }

    #[test]
    fn test_override_during_drag_keeps_pointer() {
        let mut slider = LeverageSlider::builder()
            .value(6)
            .build(track_800())
            .unwrap();

        slider.pointer_down(100.0);
        assert!(slider.set_value(9));
        assert_eq!(slider.committed_value(), 9);
        assert_eq!(slider.display_value(), 3);
        assert_eq!(slider.position(), 100.0);
        assert!(slider.phase().is_dragging());
    }

    #[test]
    fn test_resize_repositions_thumb() {
        let length = Rc::new(Cell::new(800.0_f32));
        let source = length.clone();
        let mut slider = LeverageSlider::builder()
            .build(move || Some(TrackGeometry::with_length(source.get())))
            .unwrap();
        assert_eq!(slider.position(), 400.0);

        length.set(400.0);
        assert!(slider.resize());
        assert_eq!(slider.position(), 200.0);
        assert_eq!(slider.geometry().length, 400.0);

        // Resize mid-drag is ignored
        slider.pointer_down(400.0);
        length.set(1000.0);
        assert!(!slider.resize());
        assert_eq!(slider.geometry().length, 400.0);
    }

    #[test]
    fn test_resize_during_settle_retargets() {
        let length = Rc::new(Cell::new(800.0_f32));
        let source = length.clone();
        let mut slider = LeverageSlider::builder()
            .build(move || Some(TrackGeometry::with_length(source.get())))
            .unwrap();

        slider.tap_label(10);
        slider.tick(DT);
        length.set(400.0);
        slider.resize();
        assert_eq!(slider.target_position(), 400.0);
        settle(&mut slider);
        assert_eq!(slider.position(), 400.0);
    }

    #[test]
    fn test_unmeasured_track_uses_fallback() {
        let slider = LeverageSlider::builder()
            .build(|| None::<TrackGeometry>)
            .unwrap();
        assert_eq!(slider.frame().track_length, crate::mapper::FALLBACK_TRACK_LENGTH);
        assert_eq!(slider.position(), 150.0);
    }

    #[test]
    fn test_rejects_empty_range() {
        let err = LeverageSlider::builder()
            .min(5)
            .max(5)
            .build(track_800())
            .unwrap_err();
        assert_eq!(err, SliderError::InvalidRange { min: 5, max: 5 });
    }

    #[test]
    fn test_bad_frame_delta_is_ignored() {
        let mut slider = LeverageSlider::builder().build(track_800()).unwrap();
        slider.tap_label(10);
        slider.tick(f32::NAN);
        assert_eq!(slider.position(), 400.0);
        slider.tick(5.0);
        assert!(slider.position().is_finite());
        assert!(slider.position() < 800.0);
    }

    #[test]
    fn test_hover_flags() {
        let mut slider = LeverageSlider::builder().build(track_800()).unwrap();
        assert!(slider.handle_pointer(&PointerEvent::Entered));
        assert!(slider.flags().hovering);
        assert!(!slider.set_hovering(true));
        assert!(slider.handle_pointer(&PointerEvent::Left));
        assert!(!slider.flags().hovering);
    }

    #[test]
    fn test_frame_snapshot() {
        let mut slider = LeverageSlider::builder().build(track_800()).unwrap();
        slider.pointer_down(700.0);

        let frame = slider.frame();
        assert_eq!(frame.display_value, 9);
        assert_eq!(frame.committed_value, 6);
        assert_eq!(frame.fraction, 0.875);
        assert!(frame.flags.dragging);
        assert_eq!(frame.ticks.len(), 9);
        assert_eq!(frame.selected_count(), 8);
    }

    #[test]
    fn test_accessibility_actions() {
        let mut slider = LeverageSlider::builder()
            .label("Leverage")
            .build(track_800())
            .unwrap();

        let node = slider.accessibility_node();
        assert_eq!(node.role(), Role::Slider);
        assert_eq!(node.value(), Some("6x"));
        assert_eq!(node.label(), Some("Leverage"));

        assert!(slider.perform_action(Action::Increment));
        settle(&mut slider);
        assert_eq!(slider.committed_value(), 7);
        assert!(!slider.perform_action(Action::Click));

        let labels = slider.label_nodes();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0].0, 2);
        assert_eq!(labels[0].1.label(), Some("2x"));
    }

    #[test]
    fn test_label_click_taps_label() {
        let (builder, log) = recording(LeverageSlider::builder());
        let mut slider = builder.build(track_800()).unwrap();

        let (value, node) = slider.label_nodes().swap_remove(2);
        assert!(node.supports_action(Action::Click));
        assert!(slider.perform_label_action(value, Action::Click));
        settle(&mut slider);
        assert_eq!(slider.committed_value(), 4);
        assert_eq!(fired(&log), vec![Fired::Change(4)]);

        assert!(!slider.perform_label_action(9, Action::Focus));
        assert!(!slider.accessibility_node().supports_action(Action::Focus));
    }

    #[test]
    fn test_frame_loop_observes_global_release() {
        let hub = PointerCaptureHub::new();
        let (builder, log) = recording(LeverageSlider::builder().capture_hub(&hub));
        let mut slider = builder.build(track_800()).unwrap();

        slider.pointer_down(200.0);
        assert!(slider.needs_frame());
        hub.dispatch_global_release();

        // Host schedules frames only while the slider asks for them
        let mut frames = 0;
        while slider.needs_frame() {
            slider.tick(DT);
            frames += 1;
            assert!(frames < 600, "slider never went idle");
        }

        assert_eq!(slider.phase(), SliderPhase::Idle);
        assert!(frames > 0);
        assert_eq!(
            fired(&log),
            vec![Fired::DragStart, Fired::Change(4), Fired::DragEnd(4)]
        );
    }

    #[test]
    fn test_drag_without_hub_needs_no_frames() {
        let mut slider = LeverageSlider::builder().build(track_800()).unwrap();
        slider.pointer_down(200.0);
        assert!(!slider.needs_frame());
        assert!(!slider.tick(DT));
    }

    #[test]
    fn test_rejects_overshooting_spring() {
        let err = LeverageSlider::builder()
            .spring(SpringConfig::new(100.0, 0.0, 1.0))
            .build(track_800())
            .unwrap_err();
        assert!(matches!(err, SliderError::InvalidSpring { .. }));

        let mut slider = LeverageSlider::builder().build(track_800()).unwrap();
        assert!(slider.set_spring(SpringConfig::stiff()).is_err());
        assert!(slider.set_spring(SpringConfig::molasses()).is_ok());

        slider.tap_label(10);
        settle(&mut slider);
        assert_eq!(slider.committed_value(), 10);
        assert_eq!(slider.position(), 800.0);
    }
}
