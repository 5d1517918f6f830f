//! Crate-level error types.

use std::fmt;
use std::path::PathBuf;

use crate::engine::options::OptionKind;

/// Failures raised by an engine's named-option store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// No option is registered under this name.
    Unknown(String),
    /// The option exists but holds a different kind of value.
    TypeMismatch {
        /// Option name.
        name: String,
        /// Kind the caller asked for.
        expected: OptionKind,
        /// Kind actually stored.
        found: OptionKind,
    },
    /// A text value could not be parsed into the option's kind.
    Parse {
        /// Option name.
        name: String,
        /// The rejected text.
        text: String,
    },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "unknown option '{name}'"),
            Self::TypeMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "option '{name}' holds a {found} value, expected {expected}"
            ),
            Self::Parse { name, text } => {
                write!(f, "cannot parse '{text}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for OptionError {}

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum VantageError {
    /// The rendering engine could not be brought up.
    EngineInit(String),
    /// A scene file was found but could not be loaded.
    SceneLoad {
        /// Path that failed to load.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },
    /// The scene file type is not handled by the engine.
    UnsupportedScene(PathBuf),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for VantageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngineInit(msg) => {
                write!(f, "engine initialization failed: {msg}")
            }
            Self::SceneLoad { path, reason } => {
                write!(f, "failed to load scene {}: {reason}", path.display())
            }
            Self::UnsupportedScene(path) => {
                write!(f, "unsupported scene file: {}", path.display())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for VantageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VantageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
