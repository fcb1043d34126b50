//! Leverage Platform Input
//!
//! Platform-agnostic input types consumed by Leverage widgets. Hosts
//! translate their native pointer and keyboard events into these types and
//! hand them to a widget engine; nothing here touches a window system.
//!
//! # Example
//!
//! ```rust
//! use leverage_platform::{InputEvent, Key, KeyboardEvent, PointerEvent};
//!
//! let events = [
//!     InputEvent::Pointer(PointerEvent::Down { x: 400.0, y: 12.0 }),
//!     InputEvent::Pointer(PointerEvent::Up { x: 410.0, y: 12.0 }),
//!     InputEvent::Keyboard(KeyboardEvent::pressed(Key::ArrowRight)),
//! ];
//! assert_eq!(events.len(), 3);
//! assert_eq!(Key::from_name("End"), Key::End);
//! ```

mod input;

pub use input::{InputEvent, Key, KeyState, KeyboardEvent, Modifiers, PointerEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::input::{InputEvent, Key, KeyState, KeyboardEvent, Modifiers, PointerEvent};
}
