use glam::DVec3;

use super::pose::CameraPose;

/// Camera sub-interface of a rendering engine.
///
/// The engine owns the actual camera state; the interaction layer only
/// issues these calls. Angles are in degrees, factors are multiplicative
/// (1.0 = no change).
pub trait CameraModel {
    /// Eye position.
    fn position(&self) -> DVec3;
    /// Move the eye without touching the focal point.
    fn set_position(&mut self, position: DVec3);
    /// Look-at point.
    fn focal_point(&self) -> DVec3;
    /// Move the look-at point without touching the eye.
    fn set_focal_point(&mut self, focal_point: DVec3);
    /// Up direction.
    fn view_up(&self) -> DVec3;
    /// Replace the up direction.
    fn set_view_up(&mut self, view_up: DVec3);

    /// Translate eye and focal point in the view plane by world units.
    fn pan(&mut self, right: f64, up: f64);
    /// Move the eye toward the focal point; the eye distance is divided by
    /// `factor`.
    fn dolly(&mut self, factor: f64);
    /// Narrow the field of view by `factor` without moving the eye.
    fn zoom(&mut self, factor: f64);
    /// Orbit horizontally around the focal point about the up vector.
    fn azimuth(&mut self, degrees: f64);
    /// Orbit vertically around the focal point.
    fn elevation(&mut self, degrees: f64);

    /// Frame the scene bounds, leaving `margin` of the view around them.
    fn reset_to_bounds(&mut self, margin: f64);
    /// Restore the saved default pose and projection.
    fn reset_to_default(&mut self);
    /// Save the current pose and projection as the default.
    fn set_current_as_default(&mut self);

    /// Snapshot of the current pose.
    fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position(),
            focal_point: self.focal_point(),
            view_up: self.view_up(),
        }
    }

    /// Apply every component of `pose`.
    fn set_pose(&mut self, pose: &CameraPose) {
        self.set_position(pose.position);
        self.set_focal_point(pose.focal_point);
        self.set_view_up(pose.view_up);
    }

    /// Eye to focal point distance.
    fn distance(&self) -> f64 {
        self.position().distance(self.focal_point())
    }
}
