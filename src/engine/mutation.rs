use serde::{Deserialize, Serialize};

use super::options::{OptionStore, OptionValue};
use crate::error::OptionError;

/// One change to a named option, triggered by a single key event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionMutation {
    /// Flip a boolean option.
    Toggle {
        /// Option name.
        option: String,
    },
    /// Add `delta` to a numeric option and clamp into `[min, max]`.
    Step {
        /// Option name.
        option: String,
        /// Signed increment.
        delta: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl OptionMutation {
    /// Toggle mutation for `option`.
    #[must_use]
    pub fn toggle(option: &str) -> Self {
        Self::Toggle {
            option: option.to_owned(),
        }
    }

    /// Clamped step mutation for `option`.
    #[must_use]
    pub fn step(option: &str, delta: f64, min: f64, max: f64) -> Self {
        Self::Step {
            option: option.to_owned(),
            delta,
            min,
            max,
        }
    }

    /// Name of the option this mutation targets.
    #[must_use]
    pub fn option(&self) -> &str {
        match self {
            Self::Toggle { option } | Self::Step { option, .. } => option,
        }
    }

    /// Apply to `store`, returning the option's new value.
    pub fn apply<S: OptionStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<OptionValue, OptionError> {
        match self {
            Self::Toggle { option } => store.toggle(option).map(OptionValue::Bool),
            Self::Step {
                option,
                delta,
                min,
                max,
            } => {
                let next = (store.get_number(option)? + delta).clamp(*min, *max);
                let value = OptionValue::Number(next);
                store.set(option, value.clone())?;
                Ok(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::options::{names, OptionMap};

    fn opacity_down() -> OptionMutation {
        OptionMutation::step(names::OPACITY, -0.1, 0.1, 1.0)
    }

    #[test]
    fn step_saturates_at_bounds() {
        let mut opts = OptionMap::with_renderer_defaults();
        let up = OptionMutation::step(names::OPACITY, 0.1, 0.1, 1.0);
        assert_eq!(up.apply(&mut opts).unwrap(), OptionValue::Number(1.0));

        for _ in 0..20 {
            let _ = opacity_down().apply(&mut opts).unwrap();
        }
        assert_eq!(opts.get_number(names::OPACITY).unwrap(), 0.1);
    }

    #[test]
    fn toggle_reports_new_value() {
        let mut opts = OptionMap::with_renderer_defaults();
        let m = OptionMutation::toggle(names::EDGES);
        assert_eq!(m.apply(&mut opts).unwrap(), OptionValue::Bool(true));
        assert_eq!(m.option(), names::EDGES);
    }

    #[test]
    fn step_on_non_numeric_option_is_rejected() {
        let mut opts = OptionMap::new();
        opts.register(names::OPACITY, OptionValue::Text("unset".into()));
        assert!(matches!(
            opacity_down().apply(&mut opts),
            Err(OptionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn unknown_option_is_not_created() {
        let mut opts = OptionMap::new();
        assert_eq!(
            opacity_down().apply(&mut opts),
            Err(OptionError::Unknown(names::OPACITY.into()))
        );
        assert!(opts.names().is_empty());
    }

    #[test]
    fn deserializes_from_tagged_toml() {
        let m: OptionMutation = toml::from_str(
            r#"
kind = "step"
option = "render.light.intensity"
delta = 0.1
min = 0.0
max = 5.0
"#,
        )
        .unwrap();
        assert_eq!(m, OptionMutation::step(names::LIGHT_INTENSITY, 0.1, 0.0, 5.0));
    }
}
