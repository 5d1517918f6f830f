//! Rendering-engine seam.
//!
//! Scene loading, rasterization and the camera math behind
//! [`CameraModel`] belong to the engine. [`SceneEngine`] is the surface the
//! viewer composes; [`headless::HeadlessEngine`] implements it without a
//! GPU for tests and the command-line shell.

/// GPU-less engine driven by a scene manifest.
pub mod headless;
/// Option mutations bound to keys.
pub mod mutation;
pub mod options;

use std::path::Path;

pub use headless::{HeadlessEngine, SceneDescriptor};
pub use mutation::OptionMutation;
pub use options::{OptionKind, OptionMap, OptionStore, OptionValue};

use crate::camera::CameraModel;
use crate::error::VantageError;

/// Operations the viewer needs from a rendering engine.
pub trait SceneEngine {
    /// Camera sub-interface.
    type Camera: CameraModel;
    /// Option sub-interface.
    type Options: OptionStore;

    /// Load the scene at `path`, replacing any previous one.
    fn load_scene(&mut self, path: &Path) -> Result<(), VantageError>;

    /// Shared camera access.
    fn camera(&self) -> &Self::Camera;
    /// Mutable camera access.
    fn camera_mut(&mut self) -> &mut Self::Camera;

    /// Shared option access.
    fn options(&self) -> &Self::Options;
    /// Mutable option access.
    fn options_mut(&mut self) -> &mut Self::Options;

    /// Animation time range `(start, end)` in seconds. `(0, 0)` when the
    /// scene has no animation.
    fn animation_time_range(&self) -> (f64, f64);
    /// Pose the scene at `time` seconds.
    fn load_animation_time(&mut self, time: f64);

    /// Resize the render target in physical pixels.
    fn resize(&mut self, width: u32, height: u32);
    /// Draw one frame.
    fn render(&mut self);
}
