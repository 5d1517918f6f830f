//! Camera interface and camera-side state.
//!
//! The rendering engine owns the camera; [`CameraModel`] is the surface the
//! interaction layer drives. [`OrbitCamera`] is the in-crate implementation
//! used by the headless engine.

/// Engine camera interface.
pub mod model;
/// Orbit camera implementation with saved default view.
pub mod orbit;
/// Camera pose and axis-aligned snap views.
pub mod pose;
/// Animated eye-position transitions.
pub mod transition;

pub use model::CameraModel;
pub use orbit::{OrbitCamera, SceneBounds};
pub use pose::{CameraPose, CameraView};
pub use transition::{CameraTransition, TransitionStep};
