use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::options::OptionMap;
use super::SceneEngine;
use crate::camera::{OrbitCamera, SceneBounds};
use crate::error::VantageError;

/// Scene manifest understood by [`HeadlessEngine`].
///
/// ```toml
/// [bounds]
/// min = [-1.0, -1.0, -1.0]
/// max = [1.0, 1.0, 1.0]
///
/// [animation]
/// start = 0.0
/// end = 4.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Axis-aligned scene extent.
    pub bounds: BoundsDescriptor,
    /// Animation time range, absent for static scenes.
    #[serde(default)]
    pub animation: Option<AnimationRange>,
}

/// Serialized scene extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsDescriptor {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

/// Animation time range in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationRange {
    /// First animated time.
    pub start: f64,
    /// Last animated time.
    pub end: f64,
}

impl SceneDescriptor {
    /// Static scene with the given extent.
    #[must_use]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            bounds: BoundsDescriptor { min, max },
            animation: None,
        }
    }

    /// Same scene, animated over `[start, end]`.
    #[must_use]
    pub fn with_animation(mut self, start: f64, end: f64) -> Self {
        self.animation = Some(AnimationRange { start, end });
        self
    }

    /// Parse a TOML manifest.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let desc: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        desc.validate()?;
        Ok(desc)
    }

    fn validate(&self) -> Result<(), String> {
        let BoundsDescriptor { min, max } = self.bounds;
        if !(min.is_finite() && max.is_finite()) {
            return Err("bounds must be finite".into());
        }
        if min.cmpgt(max).any() {
            return Err(format!("bounds min {min} exceeds max {max}"));
        }
        if let Some(range) = self.animation {
            if !(range.start.is_finite() && range.end.is_finite())
                || range.end < range.start
            {
                return Err(format!(
                    "invalid animation range [{}, {}]",
                    range.start, range.end
                ));
            }
        }
        Ok(())
    }

    /// `(start, end)`, or `(0, 0)` when static.
    #[must_use]
    pub fn time_range(&self) -> (f64, f64) {
        self.animation.map_or((0.0, 0.0), |r| (r.start, r.end))
    }
}

/// [`SceneEngine`] without a GPU.
///
/// Loads [`SceneDescriptor`] manifests, keeps an [`OrbitCamera`] and an
/// [`OptionMap`], and counts frames instead of drawing them.
#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    camera: OrbitCamera,
    options: OptionMap,
    scene: Option<SceneDescriptor>,
    size: (u32, u32),
    animation_time: f64,
    frames_rendered: u64,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEngine {
    /// Engine with no scene and renderer-default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::new(),
            options: OptionMap::with_renderer_defaults(),
            scene: None,
            size: (1, 1),
            animation_time: 0.0,
            frames_rendered: 0,
        }
    }

    /// Install an already-parsed scene.
    pub fn set_scene(&mut self, scene: SceneDescriptor) {
        self.camera.set_scene_bounds(SceneBounds {
            min: scene.bounds.min,
            max: scene.bounds.max,
        });
        self.animation_time = scene.time_range().0;
        self.scene = Some(scene);
    }

    /// Currently loaded scene.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneDescriptor> {
        self.scene.as_ref()
    }

    /// Time most recently passed to
    /// [`load_animation_time`](SceneEngine::load_animation_time).
    #[must_use]
    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }

    /// Render target size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl SceneEngine for HeadlessEngine {
    type Camera = OrbitCamera;
    type Options = OptionMap;

    fn load_scene(&mut self, path: &Path) -> Result<(), VantageError> {
        let is_manifest = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if !is_manifest {
            return Err(VantageError::UnsupportedScene(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            VantageError::SceneLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        let scene = SceneDescriptor::from_toml(&content).map_err(|reason| {
            VantageError::SceneLoad {
                path: path.to_path_buf(),
                reason,
            }
        })?;

        log::debug!("scene manifest {} parsed", path.display());
        self.set_scene(scene);
        Ok(())
    }

    fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    fn options(&self) -> &OptionMap {
        &self.options
    }

    fn options_mut(&mut self) -> &mut OptionMap {
        &mut self.options
    }

    fn animation_time_range(&self) -> (f64, f64) {
        self.scene
            .as_ref()
            .map_or((0.0, 0.0), SceneDescriptor::time_range)
    }

    fn load_animation_time(&mut self, time: f64) {
        self.animation_time = time;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width.max(1), height.max(1));
    }

    fn render(&mut self) {
        self.frames_rendered += 1;
    }
}
