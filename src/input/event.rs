use serde::{Deserialize, Serialize};

/// Platform-agnostic input events.
///
/// Hosts translate their toolkit's pointer, wheel and key events into
/// these and feed them to [`Viewer::handle_input`](crate::Viewer::handle_input).
/// Events serialize as tagged JSON objects so input can be scripted:
///
/// ```json
/// {"type": "pointer_pressed", "button": "primary", "x": 10.0, "y": 20.0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A pointer button went down.
    PointerPressed {
        /// Which button.
        button: PointerButton,
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels (down is positive).
        y: f64,
    },
    /// A pointer button went up.
    PointerReleased {
        /// Which button.
        button: PointerButton,
    },
    /// The pointer moved to an absolute position.
    PointerMoved {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
    /// A button was double-clicked.
    DoubleClick {
        /// Which button.
        button: PointerButton,
    },
    /// Wheel rotation in raw ticks (one notch is typically 120).
    Wheel {
        /// Signed tick count, positive away from the user.
        delta: f64,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Current modifier state.
        modifiers: Modifiers,
    },
    /// A key was pressed.
    KeyPressed {
        /// Physical key code string (`"KeyG"`, `"Digit1"`, `"Enter"`).
        key: String,
    },
}

/// Pointer button identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Primary (left) button.
    Primary,
    /// Secondary (right) button.
    Secondary,
    /// Middle button (wheel click).
    Middle,
}

/// Held modifier keys.
///
/// Shift is the "fine" modifier (pan, reduced wheel zoom); control is the
/// "roll" modifier on primary drags.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct Modifiers {
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    /// Shift only.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    /// Control only.
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };

    /// Whether the fine modifier is held.
    #[must_use]
    pub fn fine(self) -> bool {
        self.shift
    }

    /// Whether the roll modifier is held.
    #[must_use]
    pub fn roll(self) -> bool {
        self.ctrl
    }

    /// Whether any modifier is held.
    #[must_use]
    pub fn any(self) -> bool {
        self.shift || self.ctrl
    }
}
