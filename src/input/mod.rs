//! Input handling: host event types, drag tracking, the interaction
//! controller that turns pointer input into camera operations, and the
//! key-binding table.

/// Pointer, wheel and key gesture translation.
pub mod controller;
/// Pointer position and held-button tracking.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Key chords and their bound commands.
pub mod keymap;

pub use controller::{DragGesture, InteractionController, SnapRejected};
pub use event::{InputEvent, Modifiers, PointerButton};
pub use keymap::{KeyBindings, KeyChord, KeyCommand};
