use std::time::Duration;

use glam::DVec3;

use super::model::CameraModel;
use super::pose::CameraPose;
use crate::util::easing::EasingFunction;

/// Default length of a view snap.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// One animated camera move toward a fixed target pose.
///
/// Only the eye position is interpolated. The focal point and up vector
/// jump to their targets on the first frame and are re-applied on every
/// frame after that.
#[derive(Debug, Clone)]
pub struct CameraTransition {
    start: DVec3,
    target: CameraPose,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFunction,
}

/// What a transition wrote to the camera on one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStep {
    /// Linear elapsed/duration ratio in [0, 1].
    pub linear: f64,
    /// Eased progress in [0, 1].
    pub eased: f64,
    /// Eye position written this step.
    pub position: DVec3,
    /// Whether this step reached the end of the transition.
    pub finished: bool,
}

impl CameraTransition {
    /// Transition from `start` to `target` over `duration`.
    #[must_use]
    pub fn new(
        start: DVec3,
        target: CameraPose,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start,
            target,
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Eye position the transition started from.
    #[must_use]
    pub fn start(&self) -> DVec3 {
        self.start
    }

    /// Pose the transition ends on.
    #[must_use]
    pub fn target(&self) -> &CameraPose {
        &self.target
    }

    /// Linear elapsed/duration ratio in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Whether the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` and write the interpolated pose to `camera`.
    pub fn step<C: CameraModel + ?Sized>(
        &mut self,
        camera: &mut C,
        dt: Duration,
    ) -> TransitionStep {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        let linear = self.progress();
        let finished = linear >= 1.0;
        let (eased, position) = if finished {
            (1.0, self.target.position)
        } else {
            let eased = self.easing.evaluate(linear);
            (eased, self.start.lerp(self.target.position, eased))
        };

        camera.set_position(position);
        camera.set_focal_point(self.target.focal_point);
        camera.set_view_up(self.target.view_up);

        TransitionStep {
            linear,
            eased,
            position,
            finished,
        }
    }
}
