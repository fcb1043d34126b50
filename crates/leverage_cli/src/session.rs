//! Headless session replay
//!
//! Drives one slider through a scripted session on a fixed-step clock and
//! renders each step as a text bar. The session plays the owner's part for
//! controlled sliders: every `onChange` is echoed back through `set_value`.

use std::cell::Cell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use leverage_animation::{FixedClock, FrameClock};
use leverage_platform::{Key, KeyboardEvent};
use leverage_slider::{
    LeverageSlider, PointerCaptureHub, SliderBuilder, SliderFrame, TrackGeometry, ValueMode,
};
use tracing::{debug, warn};

use crate::config::{ScriptStep, SessionConfig};

/// A callback the slider fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Change(i32),
    DragStart,
    DragEnd(i32),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Change(v) => write!(f, "onChange({})", v),
            Notification::DragStart => write!(f, "onDragStart"),
            Notification::DragEnd(v) => write!(f, "onDragEnd({})", v),
        }
    }
}

type Inbox = Arc<Mutex<Vec<Notification>>>;

fn push(inbox: &Inbox, notification: Notification) {
    if let Ok(mut queue) = inbox.lock() {
        queue.push(notification);
    }
}

/// Totals for a finished replay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub steps: usize,
    pub frames: u64,
    pub notifications: Vec<Notification>,
    pub committed_value: i32,
}

/// A slider wired to a scripted host
pub struct Session {
    slider: LeverageSlider,
    hub: PointerCaptureHub,
    track: Rc<Cell<TrackGeometry>>,
    clock: FixedClock,
    max_frames_per_wait: u32,
    inbox: Inbox,
    report: SessionReport,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let hub = PointerCaptureHub::new();
        let track = Rc::new(Cell::new(config.track.geometry()));
        let inbox: Inbox = Arc::new(Mutex::new(Vec::new()));

        let (on_change, on_start, on_end) = (inbox.clone(), inbox.clone(), inbox.clone());
        let metrics = track.clone();
        let slider = SliderBuilder::from_config(config.slider.clone())
            .capture_hub(&hub)
            .on_change(move |v| push(&on_change, Notification::Change(v)))
            .on_drag_start(move || push(&on_start, Notification::DragStart))
            .on_drag_end(move |v| push(&on_end, Notification::DragEnd(v)))
            .build(move || Some(metrics.get()))?;

        debug!(
            "Session: {:?} slider, {} fps, {} steps",
            slider.mode(),
            config.clock.fps,
            config.steps.len()
        );

        Ok(Self {
            slider,
            hub,
            track,
            clock: FixedClock::from_fps(config.clock.fps),
            max_frames_per_wait: config.clock.max_frames_per_wait,
            inbox,
            report: SessionReport::default(),
        })
    }

    pub fn slider(&self) -> &LeverageSlider {
        &self.slider
    }

    /// Replay every step, writing one rendered line per step to `out`
    pub fn run<W: Write>(mut self, steps: &[ScriptStep], out: &mut W) -> Result<SessionReport> {
        writeln!(out, "{:>4}  {:<22} {}", "", "start", self.render())?;

        for (index, step) in steps.iter().enumerate() {
            self.apply(step);
            let fired = self.drain();

            write!(out, "{:>4}  {:<22} {}", index + 1, step.to_string(), self.render())?;
            for notification in &fired {
                write!(out, "  {}", notification)?;
            }
            writeln!(out)?;
        }

        self.report.steps = steps.len();
        self.report.frames = self.clock.frames();
        self.report.committed_value = self.slider.committed_value();
        Ok(self.report)
    }

    /// Feed one scripted step to the slider
    pub fn apply(&mut self, step: &ScriptStep) {
        let slider = &mut self.slider;
        let handled = match step {
            ScriptStep::PointerDown { x } => slider.pointer_down(*x),
            ScriptStep::PointerMove { x } => slider.pointer_move(*x),
            ScriptStep::PointerUp => slider.pointer_up(),
            ScriptStep::PointerCancel => slider.pointer_cancel(),
            ScriptStep::GlobalPointerUp => self.hub.dispatch_global_release() > 0,
            ScriptStep::Hover { inside } => slider.set_hovering(*inside),
            ScriptStep::Tap { value } => slider.tap_label(*value),
            ScriptStep::Key { key } => {
                slider.handle_key(&KeyboardEvent::pressed(Key::from_name(key)))
            }
            ScriptStep::SetValue { value } => slider.set_value(*value),
            ScriptStep::Resize { length } => {
                let origin = self.track.get().origin;
                self.track.set(TrackGeometry::new(origin, *length));
                slider.resize()
            }
            ScriptStep::Disable { disabled } => slider.set_disabled(*disabled),
            ScriptStep::Wait { frames } => {
                for _ in 0..*frames {
                    self.frame();
                }
                true
            }
            ScriptStep::Settle => self.settle(),
        };

        if !handled {
            debug!("Session: '{}' had no effect", step);
        }
    }

    fn frame(&mut self) -> bool {
        let dt = self.clock.next_delta();
        let more = self.slider.tick(dt);
        self.echo_owner();
        more
    }

    fn settle(&mut self) -> bool {
        let mut frames = 0;
        while self.frame() {
            frames += 1;
            if frames >= self.max_frames_per_wait {
                warn!(
                    "Session: slider still settling after {} frames, moving on",
                    frames
                );
                return false;
            }
        }
        true
    }

    /// Reconcile a controlled slider the way an owner would
    fn echo_owner(&mut self) {
        if self.slider.mode() != ValueMode::Controlled {
            return;
        }
        let pending = self.inbox.lock().ok().and_then(|queue| {
            queue.iter().rev().find_map(|n| match n {
                Notification::Change(v) => Some(*v),
                _ => None,
            })
        });
        if let Some(value) = pending {
            if value != self.slider.committed_value() {
                self.slider.set_value(value);
            }
        }
    }

    fn drain(&mut self) -> Vec<Notification> {
        let fired = match self.inbox.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        };
        self.report.notifications.extend(fired.iter().copied());
        fired
    }

    fn render(&self) -> String {
        render_bar(&self.slider.frame(), &self.slider.format_value(self.slider.display_value()))
    }
}

/// Text rendering of one frame: `[■■■■□□□□□] 6x pos=400.0 dragging`
pub fn render_bar(frame: &SliderFrame, value_text: &str) -> String {
    let bar: String = frame
        .ticks
        .iter()
        .map(|tick| if tick.selected { '■' } else { '□' })
        .collect();

    let mut line = format!("[{}] {:>4} pos={:.1}", bar, value_text, frame.position);
    if frame.flags.dragging {
        line.push_str(" dragging");
    }
    if frame.flags.hovering {
        line.push_str(" hover");
    }
    if frame.disabled {
        line.push_str(" disabled");
    }
    line
}
