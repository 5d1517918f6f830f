//! Pointer, wheel and view-key translation into camera operations.
//!
//! The `InteractionController` owns the transient interaction state (drag
//! anchor, held buttons, the single in-flight view transition) and the
//! sensitivity settings. It never stores camera state between calls except
//! inside an active [`CameraTransition`]; every operation reads the camera
//! it is handed and writes straight back to it.

use std::time::Duration;

use glam::{DQuat, DVec2};

use super::drag::DragState;
use super::event::{Modifiers, PointerButton};
use crate::camera::{CameraModel, CameraTransition, CameraView, TransitionStep};
use crate::options::CameraOptions;

/// Camera operation selected by a drag's button and modifier combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    /// Azimuth/elevation orbit around the focal point.
    Orbit,
    /// Translate in the view plane, scaled by `scale`.
    Pan {
        /// Sensitivity multiplier (1.0 or the fine factor).
        scale: f64,
    },
    /// Rotate the up vector about the view axis.
    Roll,
    /// Move the eye along the view axis.
    Dolly,
}

/// Why a view snap did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapRejected {
    /// Another transition is still running.
    InFlight,
    /// Eye and focal point coincide; there is no distance to keep.
    Degenerate,
}

/// Translates input into camera operations.
#[derive(Debug, Clone)]
pub struct InteractionController {
    drag: DragState,
    transition: Option<CameraTransition>,
    settings: CameraOptions,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}

impl InteractionController {
    /// Controller using the given sensitivities.
    #[must_use]
    pub fn new(settings: &CameraOptions) -> Self {
        Self {
            drag: DragState::new(),
            transition: None,
            settings: settings.clone(),
        }
    }

    /// Replace the sensitivity settings. A running transition keeps the
    /// duration and easing it started with.
    pub fn apply_options(&mut self, settings: &CameraOptions) {
        self.settings = settings.clone();
    }

    /// Current sensitivity settings.
    #[must_use]
    pub fn settings(&self) -> &CameraOptions {
        &self.settings
    }

    /// Pointer tracking state.
    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Whether a view transition is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// The running transition, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    // ── Pointer ──────────────────────────────────────────────────────────

    /// Button pressed: re-anchor the drag. No camera effect.
    pub fn pointer_pressed(&mut self, button: PointerButton, pos: DVec2) {
        self.drag.press(button, pos);
    }

    /// Button released.
    pub fn pointer_released(&mut self, button: PointerButton) {
        self.drag.release(button);
    }

    /// Forget held buttons, e.g. when the view loses focus mid-drag.
    pub fn release_all(&mut self) {
        self.drag.release_all();
    }

    /// Gesture for the currently held buttons and `modifiers`.
    ///
    /// The primary button takes precedence over the secondary one.
    #[must_use]
    pub fn gesture(&self, modifiers: Modifiers) -> Option<DragGesture> {
        if self.drag.is_held(PointerButton::Primary) {
            Some(if modifiers.fine() {
                DragGesture::Pan { scale: 1.0 }
            } else if modifiers.roll() {
                DragGesture::Roll
            } else {
                DragGesture::Orbit
            })
        } else if self.drag.is_held(PointerButton::Secondary) {
            Some(if modifiers.fine() {
                DragGesture::Pan {
                    scale: self.settings.fine_factor,
                }
            } else {
                DragGesture::Dolly
            })
        } else {
            None
        }
    }

    /// Pointer moved to `pos`. Always updates the drag anchor; applies the
    /// held gesture to `camera` and returns it.
    pub fn pointer_moved<C: CameraModel + ?Sized>(
        &mut self,
        camera: &mut C,
        pos: DVec2,
        modifiers: Modifiers,
    ) -> Option<DragGesture> {
        let delta = self.drag.move_to(pos);
        let gesture = self.gesture(modifiers)?;
        self.apply_gesture(camera, gesture, delta);
        Some(gesture)
    }

    /// Apply `gesture` for a pixel `delta` (x right, y down).
    pub fn apply_gesture<C: CameraModel + ?Sized>(
        &self,
        camera: &mut C,
        gesture: DragGesture,
        delta: DVec2,
    ) {
        let k_rot = self.settings.rotate_speed;
        match gesture {
            DragGesture::Orbit => {
                camera.azimuth(-delta.x * k_rot);
                camera.elevation(delta.y * k_rot);
            }
            DragGesture::Pan { scale } => {
                let speed = camera.distance() * self.settings.pan_factor * scale;
                camera.pan(-delta.x * speed, delta.y * speed);
            }
            DragGesture::Roll => {
                let Some(axis) =
                    (camera.focal_point() - camera.position()).try_normalize()
                else {
                    return;
                };
                let roll = DQuat::from_axis_angle(axis, (-delta.x * k_rot).to_radians());
                camera.set_view_up(roll * camera.view_up());
            }
            DragGesture::Dolly => {
                camera.dolly(1.0 - delta.y * self.settings.dolly_speed);
            }
        }
    }

    // ── Wheel / click ────────────────────────────────────────────────────

    /// Zoom factor for a wheel rotation of `ticks`.
    #[must_use]
    pub fn wheel_factor(&self, ticks: f64, modifiers: Modifiers) -> f64 {
        let delta = ticks * self.settings.wheel_factor;
        if modifiers.fine() {
            1.0 + delta * self.settings.fine_factor
        } else {
            1.0 + delta
        }
    }

    /// Wheel rotated: uniform zoom (field of view, not eye distance).
    pub fn wheel<C: CameraModel + ?Sized>(
        &mut self,
        camera: &mut C,
        ticks: f64,
        modifiers: Modifiers,
    ) {
        camera.zoom(self.wheel_factor(ticks, modifiers));
    }

    /// Double click: primary resets to the saved default pose. Returns
    /// whether the camera was reset.
    pub fn double_clicked<C: CameraModel + ?Sized>(
        &mut self,
        camera: &mut C,
        button: PointerButton,
    ) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        log::debug!("double click, resetting camera");
        camera.reset_to_default();
        true
    }

    // ── Views ────────────────────────────────────────────────────────────

    /// Instant jump to the saved default pose.
    pub fn reset_view<C: CameraModel + ?Sized>(&mut self, camera: &mut C) {
        camera.reset_to_default();
    }

    /// Start an animated snap to `view`, keeping the focal point and eye
    /// distance. Requests made while a transition runs are dropped.
    pub fn snap_to_view<C: CameraModel + ?Sized>(
        &mut self,
        camera: &mut C,
        view: CameraView,
    ) -> Result<(), SnapRejected> {
        if self.transition.is_some() {
            log::warn!("camera transition already running, ignoring {view:?}");
            return Err(SnapRejected::InFlight);
        }
        let current = camera.pose();
        if current.direction_of_projection().is_none() {
            return Err(SnapRejected::Degenerate);
        }
        let target = view.target_pose(&current);
        log::debug!(
            "snapping camera to {} view, {} -> {}",
            view.name(),
            current.position,
            target.position
        );
        self.transition = Some(CameraTransition::new(
            current.position,
            target,
            self.settings.transition_duration(),
            self.settings.easing,
        ));
        Ok(())
    }

    /// Advance the running transition by `dt`. Returns the step taken, or
    /// `None` when idle. The transition is dropped once it completes.
    pub fn advance<C: CameraModel + ?Sized>(
        &mut self,
        camera: &mut C,
        dt: Duration,
    ) -> Option<TransitionStep> {
        let transition = self.transition.as_mut()?;
        let step = transition.step(camera, dt);
        if step.finished {
            self.transition = None;
        }
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::camera::{CameraPose, OrbitCamera};

    /// Camera mock recording every call.
    #[derive(Default)]
    struct Recorder {
        pose: CameraPose,
        azimuth: f64,
        elevation: f64,
        pans: Vec<(f64, f64)>,
        dollies: Vec<f64>,
        zooms: Vec<f64>,
        resets: usize,
    }

    impl CameraModel for Recorder {
        fn position(&self) -> DVec3 {
            self.pose.position
        }
        fn set_position(&mut self, position: DVec3) {
            self.pose.position = position;
        }
        fn focal_point(&self) -> DVec3 {
            self.pose.focal_point
        }
        fn set_focal_point(&mut self, focal_point: DVec3) {
            self.pose.focal_point = focal_point;
        }
        fn view_up(&self) -> DVec3 {
            self.pose.view_up
        }
        fn set_view_up(&mut self, view_up: DVec3) {
            self.pose.view_up = view_up;
        }
        fn pan(&mut self, right: f64, up: f64) {
            self.pans.push((right, up));
        }
        fn dolly(&mut self, factor: f64) {
            self.dollies.push(factor);
        }
        fn zoom(&mut self, factor: f64) {
            self.zooms.push(factor);
        }
        fn azimuth(&mut self, degrees: f64) {
            self.azimuth += degrees;
        }
        fn elevation(&mut self, degrees: f64) {
            self.elevation += degrees;
        }
        fn reset_to_bounds(&mut self, _margin: f64) {}
        fn reset_to_default(&mut self) {
            self.resets += 1;
        }
        fn set_current_as_default(&mut self) {}
    }

    fn recorder_at(position: DVec3) -> Recorder {
        Recorder {
            pose: CameraPose {
                position,
                focal_point: DVec3::ZERO,
                view_up: DVec3::Y,
            },
            ..Recorder::default()
        }
    }

    fn drag(
        ctl: &mut InteractionController,
        cam: &mut Recorder,
        button: PointerButton,
        modifiers: Modifiers,
        path: &[(f64, f64)],
    ) {
        ctl.pointer_pressed(button, DVec2::new(path[0].0, path[0].1));
        for &(x, y) in &path[1..] {
            let _ = ctl.pointer_moved(cam, DVec2::new(x, y), modifiers);
        }
        ctl.pointer_released(button);
    }

    #[test]
    fn orbit_accumulates_per_move_deltas() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::new(0.0, 0.0, 10.0));
        let path = [(0.0, 0.0), (4.0, 2.0), (1.0, 7.0), (9.0, -3.0)];
        drag(&mut ctl, &mut cam, PointerButton::Primary, Modifiers::NONE, &path);

        // Sum of per-move deltas equals the net displacement.
        assert!((cam.azimuth - (-9.0 * 0.5)).abs() < 1e-12);
        assert!((cam.elevation - (-3.0 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn orbit_is_order_independent() {
        let moves = [(3.0, 1.0), (-2.0, 5.0), (7.0, -4.0)];
        let mut totals = Vec::new();
        for order in [[0, 1, 2], [2, 0, 1], [1, 2, 0]] {
            let ctl = InteractionController::default();
            let mut cam = recorder_at(DVec3::Z);
            for i in order {
                let (dx, dy) = moves[i];
                ctl.apply_gesture(&mut cam, DragGesture::Orbit, DVec2::new(dx, dy));
            }
            totals.push((cam.azimuth, cam.elevation));
        }
        for t in &totals[1..] {
            assert!((t.0 - totals[0].0).abs() < 1e-12);
            assert!((t.1 - totals[0].1).abs() < 1e-12);
        }
    }

    #[test]
    fn move_without_buttons_only_updates_anchor() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::Z);
        let gesture = ctl.pointer_moved(&mut cam, DVec2::new(50.0, 50.0), Modifiers::NONE);
        assert!(gesture.is_none());
        assert_eq!(ctl.drag_state().last_pos(), DVec2::new(50.0, 50.0));
        assert_eq!(cam.azimuth, 0.0);
    }

    #[test]
    fn shift_primary_pans_scaled_by_distance() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::new(0.0, 0.0, 200.0));
        drag(
            &mut ctl,
            &mut cam,
            PointerButton::Primary,
            Modifiers::SHIFT,
            &[(0.0, 0.0), (10.0, 5.0)],
        );
        // speed = 200 * 0.001 * 1.0
        assert_eq!(cam.pans.len(), 1);
        let (right, up) = cam.pans[0];
        assert!((right - -2.0).abs() < 1e-12);
        assert!((up - 1.0).abs() < 1e-12);
    }

    #[test]
    fn shift_secondary_pans_with_fine_scale() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::new(0.0, 0.0, 200.0));
        drag(
            &mut ctl,
            &mut cam,
            PointerButton::Secondary,
            Modifiers::SHIFT,
            &[(0.0, 0.0), (10.0, 5.0)],
        );
        let (right, up) = cam.pans[0];
        assert!((right - -0.2).abs() < 1e-12);
        assert!((up - 0.1).abs() < 1e-12);
    }

    #[test]
    fn secondary_drag_dollies() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::Z);
        drag(
            &mut ctl,
            &mut cam,
            PointerButton::Secondary,
            Modifiers::NONE,
            &[(0.0, 0.0), (0.0, -20.0)],
        );
        assert_eq!(cam.dollies.len(), 1);
        assert!((cam.dollies[0] - 1.2).abs() < 1e-12);
    }

    #[test]
    fn ctrl_primary_rolls_up_vector_only() {
        let mut ctl = InteractionController::default();
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(0.0, 0.0, 10.0));
        let before = cam.pose();
        ctl.pointer_pressed(PointerButton::Primary, DVec2::ZERO);
        // -180 px * 0.5 deg/px => +90 degrees about the view axis (-Z).
        let gesture =
            ctl.pointer_moved(&mut cam, DVec2::new(-180.0, 0.0), Modifiers::CTRL);
        assert_eq!(gesture, Some(DragGesture::Roll));
        assert_eq!(cam.position(), before.position);
        assert_eq!(cam.focal_point(), before.focal_point);
        assert!((cam.view_up() - DVec3::X).length() < 1e-9, "{}", cam.view_up());
    }

    #[test]
    fn roll_with_coincident_eye_is_skipped() {
        let ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::ZERO);
        ctl.apply_gesture(&mut cam, DragGesture::Roll, DVec2::new(10.0, 0.0));
        assert_eq!(cam.pose.view_up, DVec3::Y);
    }

    #[test]
    fn fine_wheel_is_a_tenth_of_plain_wheel() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::Z);
        ctl.wheel(&mut cam, 120.0, Modifiers::NONE);
        ctl.wheel(&mut cam, 120.0, Modifiers::SHIFT);
        let plain = cam.zooms[0] - 1.0;
        let fine = cam.zooms[1] - 1.0;
        assert!((plain - 0.12).abs() < 1e-12);
        assert!((fine - plain / 10.0).abs() < 1e-12);
        assert!(cam.dollies.is_empty());
    }

    #[test]
    fn double_click_resets_only_on_primary() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::Z);
        assert!(!ctl.double_clicked(&mut cam, PointerButton::Secondary));
        assert!(ctl.double_clicked(&mut cam, PointerButton::Primary));
        assert_eq!(cam.resets, 1);
    }

    #[test]
    fn second_snap_is_rejected_while_running() {
        let mut ctl = InteractionController::default();
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(0.0, 0.0, 10.0));

        ctl.snap_to_view(&mut cam, CameraView::Top).unwrap();
        let _ = ctl.advance(&mut cam, Duration::from_millis(100));
        let mid = cam.position();
        let target_before = *ctl.transition().unwrap().target();

        assert_eq!(
            ctl.snap_to_view(&mut cam, CameraView::Left),
            Err(SnapRejected::InFlight)
        );
        assert_eq!(cam.position(), mid);
        assert_eq!(*ctl.transition().unwrap().target(), target_before);
    }

    #[test]
    fn completed_snap_lands_on_target_and_frees_slot() {
        let mut ctl = InteractionController::default();
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(0.0, 0.0, 10.0));

        ctl.snap_to_view(&mut cam, CameraView::Top).unwrap();
        let mut last = None;
        while let Some(step) = ctl.advance(&mut cam, Duration::from_millis(16)) {
            last = Some(step);
        }
        let last = last.unwrap();
        assert_eq!(last.eased, 1.0);
        assert_eq!(cam.position(), DVec3::new(0.0, 10.0, 0.0));
        assert_eq!(cam.view_up(), DVec3::Z);
        assert!(!ctl.is_transitioning());

        assert!(ctl.snap_to_view(&mut cam, CameraView::Front).is_ok());
    }

    #[test]
    fn top_snap_midpoint_follows_easing() {
        let mut ctl = InteractionController::default();
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(10.0, 0.0, 0.0));

        ctl.snap_to_view(&mut cam, CameraView::Top).unwrap();
        let quarter = ctl.advance(&mut cam, Duration::from_millis(125)).unwrap();
        // Quadratic in-out trails linear before the midpoint.
        assert!(quarter.eased < quarter.linear);
        let half = ctl.advance(&mut cam, Duration::from_millis(125)).unwrap();
        assert!((half.eased - 0.5).abs() < 1e-12);
        assert!((cam.position() - DVec3::new(5.0, 5.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn degenerate_camera_cannot_snap() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::ZERO);
        assert_eq!(
            ctl.snap_to_view(&mut cam, CameraView::Top),
            Err(SnapRejected::Degenerate)
        );
        assert!(!ctl.is_transitioning());
    }

    #[test]
    fn advance_when_idle_is_noop() {
        let mut ctl = InteractionController::default();
        let mut cam = recorder_at(DVec3::Z);
        assert!(ctl.advance(&mut cam, Duration::from_millis(16)).is_none());
        assert_eq!(cam.pose.position, DVec3::Z);
    }
}
