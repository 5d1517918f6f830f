use glam::DVec2;

use super::event::PointerButton;

/// Pointer tracking between events: last position and held buttons.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    last_pos: DVec2,
    primary: bool,
    secondary: bool,
    middle: bool,
}

impl DragState {
    /// No buttons held, pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a button press at `pos`. Re-anchors the drag.
    pub fn press(&mut self, button: PointerButton, pos: DVec2) {
        self.last_pos = pos;
        self.set_held(button, true);
    }

    /// Record a button release.
    pub fn release(&mut self, button: PointerButton) {
        self.set_held(button, false);
    }

    /// Move to `pos`, returning the delta from the last recorded position.
    pub fn move_to(&mut self, pos: DVec2) -> DVec2 {
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        delta
    }

    /// Last recorded pointer position.
    #[must_use]
    pub fn last_pos(&self) -> DVec2 {
        self.last_pos
    }

    /// Whether `button` is held.
    #[must_use]
    pub fn is_held(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.primary,
            PointerButton::Secondary => self.secondary,
            PointerButton::Middle => self.middle,
        }
    }

    /// Drop all held buttons without moving the anchor.
    pub fn release_all(&mut self) {
        self.primary = false;
        self.secondary = false;
        self.middle = false;
    }

    fn set_held(&mut self, button: PointerButton, held: bool) {
        match button {
            PointerButton::Primary => self.primary = held,
            PointerButton::Secondary => self.secondary = held,
            PointerButton::Middle => self.middle = held,
        }
    }
}
