//! Viewer options with TOML preset support.
//!
//! Interaction sensitivities, playback parameters and the key-binding table
//! are consolidated here. Options serialize to/from TOML so a preset can
//! override any subset of them.

mod camera;
mod playback;

use std::path::Path;

pub use camera::CameraOptions;
pub use playback::PlaybackOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VantageError;
use crate::input::KeyBindings;

/// Top-level options container. All sections use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera interaction parameters.
    pub camera: CameraOptions,
    /// Animation playback parameters.
    pub playback: PlaybackOptions,
    /// Keyboard binding table.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VantageError> {
        let content = std::fs::read_to_string(path).map_err(VantageError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, VantageError> {
        toml::from_str(content)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, VantageError> {
        toml::to_string_pretty(self)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VantageError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VantageError::Io)?;
        }
        std::fs::write(path, content).map_err(VantageError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCommand, Modifiers};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = opts.to_toml().unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
rotate_speed = 0.25
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.rotate_speed, 0.25);
        // Everything else should be default
        assert_eq!(opts.camera.wheel_factor, 0.001);
        assert_eq!(opts.playback, PlaybackOptions::default());
        assert_eq!(opts.keybindings, KeyBindings::default());
    }

    #[test]
    fn keybindings_section_replaces_table() {
        let toml_str = r#"
[keybindings.bindings]
"KeyR" = { action = "reset_view" }
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.len(), 1);
        assert_eq!(
            opts.keybindings.lookup("KeyR", Modifiers::NONE),
            Some(&KeyCommand::ResetView)
        );
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\nrotate_speed = ").unwrap_err();
        assert!(matches!(err, VantageError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("vantage-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.playback.speed = 2.0;
        opts.save(&dir.join("fast.toml")).unwrap();
        Options::default().save(&dir.join("calm.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["calm", "fast"]);
        assert_eq!(Options::load(&dir.join("fast.toml")).unwrap(), opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("playback"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("rotate_speed").is_some());
        assert!(camera.get("transition_ms").is_some());
        assert!(camera.get("easing").is_none());
        assert!(camera.get("bounds_margin").is_none());

        let playback = &props["playback"]["properties"];
        assert!(playback.get("speed").is_some());
        assert!(playback.get("tick_interval_ms").is_none());
    }
}
