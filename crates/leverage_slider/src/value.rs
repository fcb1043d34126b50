//! Committed value ownership
//!
//! A slider either owns its committed value (uncontrolled) or mirrors a
//! value owned by someone else (controlled). The choice is made once at
//! construction and carried as a tag, so an owner that sometimes passes a
//! value and sometimes doesn't cannot flip the slider between modes.

/// Who writes the committed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueMode {
    /// The external owner is the only writer; the slider proposes via `on_change`
    Controlled,
    /// The slider writes its own committed value and reports changes
    Uncontrolled,
}

/// The committed value together with its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommittedValue {
    Controlled(i32),
    Uncontrolled(i32),
}

impl CommittedValue {
    pub(crate) fn new(mode: ValueMode, value: i32) -> Self {
        match mode {
            ValueMode::Controlled => CommittedValue::Controlled(value),
            ValueMode::Uncontrolled => CommittedValue::Uncontrolled(value),
        }
    }

    pub(crate) fn get(&self) -> i32 {
        match self {
            CommittedValue::Controlled(v) | CommittedValue::Uncontrolled(v) => *v,
        }
    }

    pub(crate) fn mode(&self) -> ValueMode {
        match self {
            CommittedValue::Controlled(_) => ValueMode::Controlled,
            CommittedValue::Uncontrolled(_) => ValueMode::Uncontrolled,
        }
    }

    /// A finished user interaction; only an uncontrolled slider stores it
    pub(crate) fn commit(&mut self, value: i32) -> bool {
        match self {
            CommittedValue::Uncontrolled(v) if *v != value => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// A value pushed by the owner; only a controlled slider accepts it
    pub(crate) fn set_external(&mut self, value: i32) -> bool {
        match self {
            CommittedValue::Controlled(v) if *v != value => {
                *v = value;
                true
            }
            _ => false,
        }
    }
}
