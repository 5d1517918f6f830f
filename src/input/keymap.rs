//! Keyboard bindings: key chords mapped to camera commands and option
//! mutations.
//!
//! The table is plain data. Dispatch is a lookup followed by
//! [`KeyCommand`] execution in the viewer, so bindings can be replaced from
//! a TOML preset:
//!
//! ```toml
//! [keybindings.bindings]
//! "KeyG" = { action = "mutate", mutation = { kind = "toggle", option = "render.grid.enable" } }
//! "Digit5" = { action = "snap_view", view = "top" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::event::Modifiers;
use crate::camera::CameraView;
use crate::engine::options::names;
use crate::engine::OptionMutation;

/// A physical key plus the modifiers held with it.
///
/// Written as `"Ctrl+Shift+KeyP"`; modifiers always precede the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyChord {
    /// Control held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Physical key code string.
    pub key: String,
}

impl KeyChord {
    /// Chord for `key` with `modifiers`.
    #[must_use]
    pub fn new(key: &str, modifiers: Modifiers) -> Self {
        Self {
            ctrl: modifiers.ctrl,
            shift: modifiers.shift,
            key: key.to_owned(),
        }
    }

    /// Chord for `key` with no modifiers.
    #[must_use]
    pub fn bare(key: &str) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// The modifier part of this chord.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.shift,
            ctrl: self.ctrl,
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for KeyChord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::NONE;
        let mut parts = s.split('+').map(str::trim).peekable();
        let mut key = None;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                key = Some(part);
                break;
            }
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                other => return Err(format!("unknown modifier '{other}' in '{s}'")),
            }
        }
        match key {
            Some(key) if !key.is_empty() => Ok(Self::new(key, modifiers)),
            _ => Err(format!("missing key in chord '{s}'")),
        }
    }
}

impl TryFrom<String> for KeyChord {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyChord> for String {
    fn from(chord: KeyChord) -> Self {
        chord.to_string()
    }
}

/// What a bound key does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum KeyCommand {
    /// Animate the camera to an axis-aligned view.
    SnapView {
        /// Target view.
        view: CameraView,
    },
    /// Jump back to the saved default view.
    ResetView,
    /// Change a renderer option.
    Mutate {
        /// The change to apply.
        mutation: OptionMutation,
    },
    /// Play or pause scene animation.
    TogglePlayback,
}

impl KeyCommand {
    fn toggle(option: &str) -> Self {
        Self::Mutate {
            mutation: OptionMutation::toggle(option),
        }
    }

    fn step(option: &str, delta: f64, min: f64, max: f64) -> Self {
        Self::Mutate {
            mutation: OptionMutation::step(option, delta, min, max),
        }
    }
}

/// Opacity adjustment increment and bounds.
const OPACITY_STEP: f64 = 0.1;
const OPACITY_MIN: f64 = 0.1;
const OPACITY_MAX: f64 = 1.0;
/// Light intensity adjustment increment and bounds.
const LIGHT_STEP: f64 = 0.1;
const LIGHT_MIN: f64 = 0.0;
const LIGHT_MAX: f64 = 5.0;

/// Maps [`KeyChord`]s to [`KeyCommand`]s.
///
/// Lookup tries the exact chord, then the chord with Ctrl alone, then with
/// Shift alone, then the bare key. Ctrl takes precedence when both are held
/// and only single-modifier bindings exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyBindings {
    bindings: BTreeMap<KeyChord, KeyCommand>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings: BTreeMap<KeyChord, KeyCommand> = BTreeMap::new();
        let mut bind = |chord: &str, command: KeyCommand| {
            if let Ok(chord) = chord.parse::<KeyChord>() {
                let _ = bindings.insert(chord, command);
            }
        };

        for (digit, view) in (1..).zip(CameraView::ALL) {
            bind(&format!("Digit{digit}"), KeyCommand::SnapView { view });
        }
        bind("Enter", KeyCommand::ResetView);
        bind("NumpadEnter", KeyCommand::ResetView);
        bind("Space", KeyCommand::TogglePlayback);

        bind("Digit7", KeyCommand::toggle(names::ORTHOGRAPHIC));
        bind("KeyB", KeyCommand::toggle(names::SCALAR_BAR));
        bind("KeyP", KeyCommand::toggle(names::TRANSLUCENCY));
        bind(
            "Ctrl+KeyP",
            KeyCommand::step(names::OPACITY, OPACITY_STEP, OPACITY_MIN, OPACITY_MAX),
        );
        bind(
            "Shift+KeyP",
            KeyCommand::step(names::OPACITY, -OPACITY_STEP, OPACITY_MIN, OPACITY_MAX),
        );
        bind("KeyQ", KeyCommand::toggle(names::AMBIENT_OCCLUSION));
        bind("KeyA", KeyCommand::toggle(names::ANTI_ALIASING));
        bind("Shift+KeyA", KeyCommand::toggle(names::ARMATURE));
        bind("KeyT", KeyCommand::toggle(names::TONE_MAPPING));
        bind("KeyE", KeyCommand::toggle(names::EDGES));
        bind("KeyG", KeyCommand::toggle(names::GRID));
        bind("KeyM", KeyCommand::toggle(names::METADATA));
        bind("KeyZ", KeyCommand::toggle(names::FPS));
        bind("KeyV", KeyCommand::toggle(names::VOLUME));
        bind("KeyI", KeyCommand::toggle(names::VOLUME_INVERSE));
        bind("KeyO", KeyCommand::toggle(names::POINT_SPRITES));
        bind("KeyU", KeyCommand::toggle(names::BACKGROUND_BLUR));
        bind("KeyF", KeyCommand::toggle(names::HDRI_AMBIENT));
        bind("KeyJ", KeyCommand::toggle(names::SKYBOX));
        bind(
            "KeyL",
            KeyCommand::step(names::LIGHT_INTENSITY, LIGHT_STEP, LIGHT_MIN, LIGHT_MAX),
        );
        bind(
            "Shift+KeyL",
            KeyCommand::step(names::LIGHT_INTENSITY, -LIGHT_STEP, LIGHT_MIN, LIGHT_MAX),
        );

        Self { bindings }
    }
}

impl KeyBindings {
    /// Table with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Same table with `chord` bound to `command`.
    #[must_use]
    pub fn with_binding(mut self, chord: KeyChord, command: KeyCommand) -> Self {
        let _ = self.bindings.insert(chord, command);
        self
    }

    /// Command for `key` pressed with `modifiers`, if bound.
    #[must_use]
    pub fn lookup(&self, key: &str, modifiers: Modifiers) -> Option<&KeyCommand> {
        let both = modifiers.ctrl && modifiers.shift;
        let fallbacks = [
            (both, Modifiers::CTRL),
            (both, Modifiers::SHIFT),
            (modifiers.any(), Modifiers::NONE),
        ];
        self.bindings
            .get(&KeyChord::new(key, modifiers))
            .or_else(|| {
                fallbacks
                    .into_iter()
                    .filter(|&(applies, _)| applies)
                    .find_map(|(_, held)| self.bindings.get(&KeyChord::new(key, held)))
            })
    }

    /// Number of bound chords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over `(chord, command)` pairs in chord order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyChord, &KeyCommand)> {
        self.bindings.iter()
    }
}
