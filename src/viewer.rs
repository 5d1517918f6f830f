//! Viewer shell composing a rendering engine with the interaction layer.
//!
//! The host owns the event loop and forwards input, timer ticks, frame
//! callbacks and resizes to the [`Viewer`]. Every operation is a no-op
//! until an engine has been started successfully.
//!
//! ```
//! # use glam::DVec3;
//! # use vantage::engine::{HeadlessEngine, SceneDescriptor};
//! # use vantage::{InputEvent, Viewer};
//! let mut engine = HeadlessEngine::new();
//! engine.set_scene(SceneDescriptor::new(DVec3::splat(-1.0), DVec3::ONE));
//!
//! let mut viewer = Viewer::builder().with_size(800, 600).build();
//! viewer.start(engine)?;
//! let _ = viewer.handle_input(&InputEvent::KeyPressed { key: "Digit5".into() });
//! let _ = viewer.on_frame(std::time::Duration::from_millis(16));
//! # Ok::<(), vantage::VantageError>(())
//! ```

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::DVec2;
use web_time::Instant;

use crate::camera::{CameraModel, CameraPose, CameraView};
use crate::engine::options::names;
use crate::engine::{OptionStore, OptionValue, SceneEngine};
use crate::error::VantageError;
use crate::input::{InputEvent, InteractionController, KeyCommand, Modifiers};
use crate::options::Options;
use crate::playback::AnimationClock;
use crate::sidebar::{SidebarIntent, SidebarState};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
#[derive(Debug)]
pub struct ViewerBuilder<E> {
    path: Option<PathBuf>,
    options: Option<Options>,
    size: (u32, u32),
    engine: PhantomData<fn() -> E>,
}

impl<E: SceneEngine> ViewerBuilder<E> {
    /// Builder with no scene path, default options and a 1x1 target.
    fn new() -> Self {
        Self {
            path: None,
            options: None,
            size: (1, 1),
            engine: PhantomData,
        }
    }

    /// Scene file the engine loads on [`Viewer::start`].
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Initial render target size in physical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Consume the builder and produce an unstarted [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer<E> {
        let options = self.options.unwrap_or_default();
        Viewer {
            engine: None,
            path: self.path,
            controller: InteractionController::new(&options.camera),
            clock: AnimationClock::new(&options.playback),
            options,
            modifiers: Modifiers::NONE,
            size: self.size,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// Interactive 3D viewer over a [`SceneEngine`].
///
/// Construct via [`Viewer::builder`], then hand it an engine with
/// [`start`](Self::start).
#[derive(Debug)]
pub struct Viewer<E: SceneEngine> {
    engine: Option<E>,
    path: Option<PathBuf>,
    options: Options,
    controller: InteractionController,
    clock: AnimationClock,
    modifiers: Modifiers,
    size: (u32, u32),
}

impl<E: SceneEngine> Viewer<E> {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder<E> {
        ViewerBuilder::new()
    }

    /// Install `engine`, load the configured scene and set up the initial
    /// view.
    pub fn start(&mut self, engine: E) -> Result<(), VantageError> {
        self.start_with(|| Ok(engine))
    }

    /// Create the engine with `init`, then proceed as [`start`](Self::start).
    ///
    /// On failure the error is logged and returned, and the viewer stays
    /// without an engine.
    pub fn start_with(
        &mut self,
        init: impl FnOnce() -> Result<E, VantageError>,
    ) -> Result<(), VantageError> {
        self.engine = None;
        let mut engine = init()
            .inspect_err(|e| log::error!("Failed to initialize engine: {e}"))?;
        engine.resize(self.size.0.max(1), self.size.1.max(1));
        if let Some(path) = &self.path {
            engine
                .load_scene(path)
                .inspect_err(|e| log::error!("Failed to load scene: {e}"))?;
            log::info!("loaded scene {}", path.display());
        }

        if let Err(e) = engine.options_mut().set(names::GRID, OptionValue::Bool(true)) {
            log::warn!("cannot enable grid: {e}");
        }
        let camera = engine.camera_mut();
        let settings = &self.options.camera;
        camera.reset_to_bounds(settings.bounds_margin);
        camera.azimuth(settings.initial_azimuth);
        camera.elevation(settings.initial_elevation);
        camera.set_current_as_default();

        if self.clock.start(engine.animation_time_range()) {
            engine.load_animation_time(self.clock.current_time());
        }
        self.controller = InteractionController::new(&self.options.camera);
        self.engine = Some(engine);
        Ok(())
    }

    /// Whether an engine is running.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.engine.is_some()
    }

    /// Shut the engine down, returning it.
    pub fn stop(&mut self) -> Option<E> {
        self.controller.release_all();
        self.engine.take()
    }

    /// The running engine.
    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Mutable access to the running engine.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Scene path loaded on start.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current viewer options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the viewer options. Sensitivities, playback speed and key
    /// bindings take effect immediately.
    pub fn set_options(&mut self, options: Options) {
        self.controller.apply_options(&options.camera);
        self.clock.apply_options(&options.playback);
        self.options = options;
    }

    /// Interaction state.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Animation clock state.
    #[must_use]
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Current camera pose, if an engine is running.
    #[must_use]
    pub fn camera_pose(&self) -> Option<CameraPose> {
        self.engine.as_ref().map(|engine| engine.camera().pose())
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Route one host input event. Returns whether it changed the camera,
    /// an option or playback.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::ModifiersChanged { modifiers } => {
                self.modifiers = *modifiers;
                false
            }
            InputEvent::PointerPressed { button, x, y } => {
                self.controller.pointer_pressed(*button, DVec2::new(*x, *y));
                false
            }
            InputEvent::PointerReleased { button } => {
                self.controller.pointer_released(*button);
                false
            }
            InputEvent::PointerMoved { x, y } => {
                let Some(engine) = self.engine.as_mut() else {
                    return false;
                };
                self.controller
                    .pointer_moved(engine.camera_mut(), DVec2::new(*x, *y), self.modifiers)
                    .is_some()
            }
            InputEvent::DoubleClick { button } => {
                let Some(engine) = self.engine.as_mut() else {
                    return false;
                };
                self.controller.double_clicked(engine.camera_mut(), *button)
            }
            InputEvent::Wheel { delta } => {
                let Some(engine) = self.engine.as_mut() else {
                    return false;
                };
                self.controller
                    .wheel(engine.camera_mut(), *delta, self.modifiers);
                true
            }
            InputEvent::KeyPressed { key } => self.handle_key(key, self.modifiers),
        }
    }

    /// Dispatch a key press through the binding table.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        if self.engine.is_none() {
            return false;
        }
        let Some(command) = self.options.keybindings.lookup(key, modifiers).cloned()
        else {
            log::trace!("unbound key {key}");
            return false;
        };
        self.execute(&command)
    }

    /// Run a bound command.
    pub fn execute(&mut self, command: &KeyCommand) -> bool {
        match command {
            KeyCommand::SnapView { view } => self.move_camera(*view),
            KeyCommand::ResetView => self.reset_camera(),
            KeyCommand::TogglePlayback => {
                self.engine.is_some() && {
                    let was = self.clock.is_playing();
                    self.clock.toggle_playing() != was
                }
            }
            KeyCommand::Mutate { mutation } => {
                let Some(engine) = self.engine.as_mut() else {
                    return false;
                };
                match mutation.apply(engine.options_mut()) {
                    Ok(value) => {
                        log::debug!("{} = {value}", mutation.option());
                        true
                    }
                    Err(e) => {
                        log::warn!("option change failed: {e}");
                        false
                    }
                }
            }
        }
    }

    // ── Camera ───────────────────────────────────────────────────────────

    /// Start an animated snap to `view`. Returns `false` when no engine is
    /// running or another snap is still in flight.
    pub fn move_camera(&mut self, view: CameraView) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        self.controller
            .snap_to_view(engine.camera_mut(), view)
            .is_ok()
    }

    /// Jump to the saved default view.
    pub fn reset_camera(&mut self) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        log::info!("camera reset to default view");
        self.controller.reset_view(engine.camera_mut());
        true
    }

    // ── Host callbacks ───────────────────────────────────────────────────

    /// Animation timer callback with the time since the previous tick.
    /// Returns the scene time loaded, if the clock advanced.
    pub fn on_tick(&mut self, elapsed: Duration) -> Option<f64> {
        let engine = self.engine.as_mut()?;
        let time = self.clock.tick(elapsed)?;
        engine.load_animation_time(time);
        Some(time)
    }

    /// Animation timer callback measured against the wall clock.
    pub fn on_tick_at(&mut self, now: Instant) -> Option<f64> {
        let engine = self.engine.as_mut()?;
        let time = self.clock.tick_at(now)?;
        engine.load_animation_time(time);
        Some(time)
    }

    /// Per-frame callback: advance any view snap by `dt`, then render.
    /// Returns whether a snap is still running.
    pub fn on_frame(&mut self, dt: Duration) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        if let Some(step) = self.controller.advance(engine.camera_mut(), dt) {
            log::trace!("camera snap at {:.3}", step.eased);
        }
        engine.render();
        self.controller.is_transitioning()
    }

    /// Render target resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(width.max(1), height.max(1));
        }
    }

    // ── Playback ─────────────────────────────────────────────────────────

    /// Whether the scene has an animation time range.
    #[must_use]
    pub fn has_animation(&self) -> bool {
        self.engine.is_some() && self.clock.has_animation()
    }

    /// Play or pause. Play is refused on a scene with no animation.
    pub fn set_playing(&mut self, playing: bool) -> bool {
        self.engine.is_some() && self.clock.set_playing(playing)
    }

    /// Pause and rewind to the start of the range.
    pub fn reset_animation(&mut self) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        if let Some(time) = self.clock.reset() {
            engine.load_animation_time(time);
        }
        true
    }

    // ── Options ──────────────────────────────────────────────────────────

    /// Current value of the named engine option.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<OptionValue> {
        let engine = self.engine.as_ref()?;
        engine
            .options()
            .get(name)
            .inspect_err(|e| log::warn!("{e}"))
            .ok()
    }

    /// Set the named engine option from text, parsed into the option's
    /// current kind. Failures are logged and reported as `false`.
    pub fn set_option(&mut self, name: &str, text: &str) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        match engine.options_mut().set_from_text(name, text) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    // ── Sidebar ──────────────────────────────────────────────────────────

    /// Apply one sidebar intent.
    pub fn apply_intent(&mut self, intent: SidebarIntent) -> bool {
        let (name, on) = match intent {
            SidebarIntent::ShowGrid(on) => (names::GRID, on),
            SidebarIntent::ShowEdges(on) => (names::EDGES, on),
            SidebarIntent::ShowPointSprites(on) => (names::POINT_SPRITES, on),
            SidebarIntent::ShowMetadata(on) => (names::METADATA, on),
            SidebarIntent::ShowFps(on) => (names::FPS, on),
            SidebarIntent::PlayAnimation(on) => return self.set_playing(on),
            SidebarIntent::ResetAnimation => return self.reset_animation(),
            SidebarIntent::SnapView(view) => return self.move_camera(view),
            SidebarIntent::ResetView => return self.reset_camera(),
        };
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        match engine.options_mut().set(name, OptionValue::Bool(on)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Snapshot of the values the sidebar controls should show.
    #[must_use]
    pub fn sidebar_state(&self) -> SidebarState {
        let Some(engine) = self.engine.as_ref() else {
            return SidebarState::default();
        };
        let flag = |name: &str| engine.options().get_bool(name).unwrap_or(false);
        SidebarState {
            grid: flag(names::GRID),
            edges: flag(names::EDGES),
            point_sprites: flag(names::POINT_SPRITES),
            metadata: flag(names::METADATA),
            fps: flag(names::FPS),
            show_animation_controls: self.clock.has_animation(),
            animation_running: self.clock.is_playing(),
        }
    }
}
