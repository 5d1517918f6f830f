//! Named renderer options.
//!
//! Engines expose their settings as a flat namespace of dotted names
//! (`render.grid.enable`, `model.color.opacity`, ...) holding boolean,
//! numeric or text values. Access is checked: an unknown name or a
//! mismatched kind is reported as an [`OptionError`], never a panic.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::OptionError;

/// Kind of value an option holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// `true` / `false`.
    Bool,
    /// Floating point number.
    Number,
    /// Free text.
    Text,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "boolean",
            Self::Number => "numeric",
            Self::Text => "text",
        })
    }
}

/// A single option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl OptionValue {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Bool(_) => OptionKind::Bool,
            Self::Number(_) => OptionKind::Number,
            Self::Text(_) => OptionKind::Text,
        }
    }

    /// Parse `text` as a value of `kind`.
    #[must_use]
    pub fn parse_as(kind: OptionKind, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            OptionKind::Bool => match text.to_ascii_lowercase().as_str() {
                "true" | "1" | "on" | "yes" => Some(Self::Bool(true)),
                "false" | "0" | "off" | "no" => Some(Self::Bool(false)),
                _ => None,
            },
            OptionKind::Number => text.parse().ok().map(Self::Number),
            OptionKind::Text => Some(Self::Text(text.to_owned())),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Option sub-interface of a rendering engine.
pub trait OptionStore {
    /// Current value of `name`.
    fn get(&self, name: &str) -> Result<OptionValue, OptionError>;

    /// Replace the value of `name`. The new value must have the same kind
    /// as the stored one.
    fn set(&mut self, name: &str, value: OptionValue) -> Result<(), OptionError>;

    /// Whether `name` is registered.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Read a boolean option.
    fn get_bool(&self, name: &str) -> Result<bool, OptionError> {
        match self.get(name)? {
            OptionValue::Bool(b) => Ok(b),
            other => Err(mismatch(name, OptionKind::Bool, &other)),
        }
    }

    /// Read a numeric option.
    fn get_number(&self, name: &str) -> Result<f64, OptionError> {
        match self.get(name)? {
            OptionValue::Number(n) => Ok(n),
            other => Err(mismatch(name, OptionKind::Number, &other)),
        }
    }

    /// Flip a boolean option, returning the new value.
    fn toggle(&mut self, name: &str) -> Result<bool, OptionError> {
        let flipped = !self.get_bool(name)?;
        self.set(name, OptionValue::Bool(flipped))?;
        Ok(flipped)
    }

    /// Set an option from text, parsed into the option's current kind.
    fn set_from_text(&mut self, name: &str, text: &str) -> Result<(), OptionError> {
        let kind = self.get(name)?.kind();
        let value = OptionValue::parse_as(kind, text).ok_or_else(|| {
            OptionError::Parse {
                name: name.to_owned(),
                text: text.to_owned(),
            }
        })?;
        self.set(name, value)
    }
}

fn mismatch(name: &str, expected: OptionKind, found: &OptionValue) -> OptionError {
    OptionError::TypeMismatch {
        name: name.to_owned(),
        expected,
        found: found.kind(),
    }
}

/// Well-known option names shared by the key table and the sidebar.
pub mod names {
    /// Ground grid visibility.
    pub const GRID: &str = "render.grid.enable";
    /// Mesh edge overlay.
    pub const EDGES: &str = "render.show_edges";
    /// Point-sprite rendering of vertices.
    pub const POINT_SPRITES: &str = "model.point_sprites.enable";
    /// Metadata overlay.
    pub const METADATA: &str = "ui.metadata";
    /// Frame-rate overlay.
    pub const FPS: &str = "ui.fps";
    /// Scalar bar overlay.
    pub const SCALAR_BAR: &str = "ui.scalar_bar";
    /// Orthographic projection.
    pub const ORTHOGRAPHIC: &str = "scene.camera.orthographic";
    /// Translucency support.
    pub const TRANSLUCENCY: &str = "render.effect.translucency_support";
    /// Ambient occlusion.
    pub const AMBIENT_OCCLUSION: &str = "render.effect.ambient_occlusion";
    /// Anti-aliasing.
    pub const ANTI_ALIASING: &str = "render.effect.anti_aliasing";
    /// Tone mapping.
    pub const TONE_MAPPING: &str = "render.effect.tone_mapping";
    /// Armature display.
    pub const ARMATURE: &str = "render.armature.enable";
    /// Volume rendering.
    pub const VOLUME: &str = "model.volume.enable";
    /// Inverted volume transfer function.
    pub const VOLUME_INVERSE: &str = "model.volume.inverse";
    /// Background blur.
    pub const BACKGROUND_BLUR: &str = "render.background.blur.enable";
    /// HDRI ambient lighting.
    pub const HDRI_AMBIENT: &str = "render.hdri.ambient";
    /// HDRI skybox background.
    pub const SKYBOX: &str = "render.background.skybox";
    /// Surface opacity in [0, 1].
    pub const OPACITY: &str = "model.color.opacity";
    /// Key light intensity.
    pub const LIGHT_INTENSITY: &str = "render.light.intensity";
}

/// Hash-map backed [`OptionStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionMap {
    values: FxHashMap<String, OptionValue>,
}

impl OptionMap {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the renderer option namespace and its defaults.
    #[must_use]
    pub fn with_renderer_defaults() -> Self {
        let mut map = Self::new();
        for name in [
            names::GRID,
            names::EDGES,
            names::POINT_SPRITES,
            names::METADATA,
            names::FPS,
            names::SCALAR_BAR,
            names::ORTHOGRAPHIC,
            names::TRANSLUCENCY,
            names::AMBIENT_OCCLUSION,
            names::ANTI_ALIASING,
            names::TONE_MAPPING,
            names::ARMATURE,
            names::VOLUME,
            names::VOLUME_INVERSE,
            names::BACKGROUND_BLUR,
            names::HDRI_AMBIENT,
            names::SKYBOX,
        ] {
            map.register(name, OptionValue::Bool(false));
        }
        map.register(names::OPACITY, OptionValue::Number(1.0));
        map.register(names::LIGHT_INTENSITY, OptionValue::Number(1.0));
        map
    }

    /// Add or replace an option, fixing its kind.
    pub fn register(&mut self, name: &str, value: OptionValue) {
        let _ = self.values.insert(name.to_owned(), value);
    }

    /// Registered option names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl OptionStore for OptionMap {
    fn get(&self, name: &str) -> Result<OptionValue, OptionError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| OptionError::Unknown(name.to_owned()))
    }

    fn set(&mut self, name: &str, value: OptionValue) -> Result<(), OptionError> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| OptionError::Unknown(name.to_owned()))?;
        if slot.kind() != value.kind() {
            return Err(OptionError::TypeMismatch {
                name: name.to_owned(),
                expected: slot.kind(),
                found: value.kind(),
            });
        }
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_value() {
        let mut opts = OptionMap::with_renderer_defaults();
        let before = opts.get(names::GRID).unwrap();
        assert!(opts.toggle(names::GRID).unwrap());
        assert!(!opts.toggle(names::GRID).unwrap());
        assert_eq!(opts.get(names::GRID).unwrap(), before);
    }

    #[test]
    fn unknown_name_is_reported() {
        let mut opts = OptionMap::new();
        assert_eq!(
            opts.toggle("render.nope"),
            Err(OptionError::Unknown("render.nope".into()))
        );
        assert!(!opts.contains("render.nope"));
    }

    #[test]
    fn kind_is_fixed_at_registration() {
        let mut opts = OptionMap::with_renderer_defaults();
        let err = opts.set(names::OPACITY, OptionValue::Bool(true)).unwrap_err();
        assert_eq!(
            err,
            OptionError::TypeMismatch {
                name: names::OPACITY.into(),
                expected: OptionKind::Number,
                found: OptionKind::Bool,
            }
        );
        assert!(matches!(
            opts.toggle(names::OPACITY),
            Err(OptionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn set_from_text_parses_into_stored_kind() {
        let mut opts = OptionMap::with_renderer_defaults();
        opts.set_from_text(names::OPACITY, " 0.25 ").unwrap();
        assert_eq!(opts.get_number(names::OPACITY).unwrap(), 0.25);
        opts.set_from_text(names::FPS, "on").unwrap();
        assert!(opts.get_bool(names::FPS).unwrap());
        assert!(matches!(
            opts.set_from_text(names::FPS, "sometimes"),
            Err(OptionError::Parse { .. })
        ));
    }

    #[test]
    fn names_are_sorted() {
        let opts = OptionMap::with_renderer_defaults();
        let names = opts.names();
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
        assert!(names.contains(&"ui.fps"));
    }
}
