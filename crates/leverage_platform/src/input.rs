//! Input event types for pointer and keyboard

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer event (mouse, pen, or primary touch)
    Pointer(PointerEvent),
    /// Keyboard event
    Keyboard(KeyboardEvent),
}

// ============================================================================
// Pointer Events
// ============================================================================

/// Pointer events
///
/// Coordinates are expressed in the host surface's coordinate space. Widgets
/// subtract their own measured origin to get local offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down {
        /// X position when pressed
        x: f32,
        /// Y position when pressed
        y: f32,
    },
    /// Pointer moved
    Moved {
        /// X position in surface coordinates
        x: f32,
        /// Y position in surface coordinates
        y: f32,
    },
    /// Primary button released
    Up {
        /// X position when released
        x: f32,
        /// Y position when released
        y: f32,
    },
    /// Pointer entered the widget surface
    Entered,
    /// Pointer left the widget surface
    Left,
    /// The platform took the pointer away (capture lost, system gesture)
    Cancelled,
}

impl PointerEvent {
    /// Get the position (returns None for events without coordinates)
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            PointerEvent::Down { x, y } => Some((*x, *y)),
            PointerEvent::Moved { x, y } => Some((*x, *y)),
            PointerEvent::Up { x, y } => Some((*x, *y)),
            PointerEvent::Entered | PointerEvent::Left | PointerEvent::Cancelled => None,
        }
    }
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key press with no modifiers held
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
        }
    }

    /// A key release with no modifiers held
    pub fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
        }
    }

    /// Check if this is a key press
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Pressed
    }
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Key codes
///
/// Only the keys a value widget reacts to get their own variant. Printable
/// input arrives as `Char`, everything else as `Unidentified`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Arrow keys
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Special keys
    Tab,
    Enter,
    Space,
    Escape,

    // Character input
    Char(char),

    // Unknown key
    Unidentified,
}

impl Key {
    /// Parse a DOM-style key name (`"ArrowRight"`, `"Home"`, `"a"`)
    ///
    /// Unknown names map to [`Key::Unidentified`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Tab" => Key::Tab,
            "Enter" => Key::Enter,
            " " | "Space" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unidentified,
                }
            }
        }
    }
}
