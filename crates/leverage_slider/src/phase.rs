//! Interaction phases and their transition table
//!
//! The engine never flips phase flags by hand; every change goes through
//! [`SliderPhase::on_event`], so the table below is the whole story of what
//! can follow what.
//!
//! | From | Event | To |
//! |---|---|---|
//! | `Idle` | `PointerDown` | `Dragging` |
//! | `Idle` | `Commit` | `Settling` |
//! | `Dragging` | `Release` | `Settling` (drag-end owed) |
//! | `Settling` | `Commit` | `Settling` (retargeted) |
//! | `Settling` | `Settled` / `Override` | `Idle` |
//! | `Idle` | `Override` | `Idle` |
//!
//! A press that lands while `Settling` is handled by the engine as
//! `Settled` (flushing the pending commit) followed by `PointerDown`.

/// Where the slider is in an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliderPhase {
    /// Nothing in flight; the display matches the committed value
    #[default]
    Idle,
    /// Pointer held down; position follows the pointer 1:1
    Dragging,
    /// Animating onto a new target before publishing it
    Settling {
        /// A pointer release is part of this settle, so drag-end is still owed
        after_release: bool,
    },
}

/// Inputs to the phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseEvent {
    /// Pointer pressed on the track
    PointerDown,
    /// Pointer released, cancelled, or released outside the widget
    Release,
    /// Label tap or keyboard step asked for a new value
    Commit,
    /// The settle animation reached its target
    Settled,
    /// The external owner pushed a value
    Override,
}

impl SliderPhase {
    /// Handle an event and return the new phase, or None if no transition
    pub fn on_event(&self, event: PhaseEvent) -> Option<Self> {
        use PhaseEvent::*;
        use SliderPhase::*;

        match (self, event) {
            // Idle transitions
            (Idle, PointerDown) => Some(Dragging),
            (Idle, Commit) => Some(Settling {
                after_release: false,
            }),

            // Dragging only ends by release; taps, keys and overrides wait
            (Dragging, Release) => Some(Settling {
                after_release: true,
            }),

            // Settling transitions - new commits retarget in place
            (Settling { after_release }, Commit) => Some(Settling {
                after_release: *after_release,
            }),
            (Settling { .. }, Settled) => Some(Idle),
            (Settling { .. }, Override) => Some(Idle),

            // Overrides on an idle slider re-sync in place
            (Idle, Override) => Some(Idle),

            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SliderPhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, SliderPhase::Dragging)
    }

    pub fn is_settling(&self) -> bool {
        matches!(self, SliderPhase::Settling { .. })
    }

    /// The drag affordance stays on until a release has finished settling
    pub fn shows_drag(&self) -> bool {
        matches!(
            self,
            SliderPhase::Dragging
                | SliderPhase::Settling {
                    after_release: true
                }
        )
    }
}
