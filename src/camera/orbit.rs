use glam::{DMat4, DQuat, DVec3};

use super::model::CameraModel;
use super::pose::CameraPose;

const DEFAULT_VIEW_ANGLE: f64 = 30.0;
const MIN_VIEW_ANGLE: f64 = 0.01;
const MAX_VIEW_ANGLE: f64 = 179.0;

/// Pose plus projection, as captured by
/// [`set_current_as_default`](CameraModel::set_current_as_default).
#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedView {
    pose: CameraPose,
    view_angle: f64,
}

/// Axis-aligned scene extent used for framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl SceneBounds {
    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the bounding sphere around [`center`](Self::center).
    #[must_use]
    pub fn radius(&self) -> f64 {
        (self.max - self.min).length() * 0.5
    }
}

/// Perspective orbit camera implementing the engine camera interface.
///
/// Azimuth/elevation orbit the eye about the focal point, dolly scales the
/// eye distance, zoom narrows the field of view.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    position: DVec3,
    focal_point: DVec3,
    view_up: DVec3,
    /// Vertical field of view in degrees.
    view_angle: f64,
    bounds: Option<SceneBounds>,
    default_view: SavedView,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Camera at +Z looking at the origin.
    #[must_use]
    pub fn new() -> Self {
        let pose = CameraPose::default();
        Self {
            position: pose.position,
            focal_point: pose.focal_point,
            view_up: pose.view_up,
            view_angle: DEFAULT_VIEW_ANGLE,
            bounds: None,
            default_view: SavedView {
                pose,
                view_angle: DEFAULT_VIEW_ANGLE,
            },
        }
    }

    /// Set the extent used by [`reset_to_bounds`](CameraModel::reset_to_bounds).
    pub fn set_scene_bounds(&mut self, bounds: SceneBounds) {
        self.bounds = Some(bounds);
    }

    /// Current scene extent, if one was provided.
    #[must_use]
    pub fn scene_bounds(&self) -> Option<SceneBounds> {
        self.bounds
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn view_angle(&self) -> f64 {
        self.view_angle
    }

    /// Right-handed view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.focal_point, self.view_up)
    }

    /// Perspective projection with a [0,1] depth range.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f64, znear: f64, zfar: f64) -> DMat4 {
        DMat4::perspective_rh(self.view_angle.to_radians(), aspect, znear, zfar)
    }

    /// Unit direction from eye to focal point, defaulting to -Z when the
    /// two coincide.
    fn direction_of_projection(&self) -> DVec3 {
        (self.focal_point - self.position)
            .try_normalize()
            .unwrap_or(DVec3::NEG_Z)
    }

    /// Camera right axis and an up axis orthogonal to the view direction.
    fn view_basis(&self) -> (DVec3, DVec3) {
        let dop = self.direction_of_projection();
        let right = dop
            .cross(self.view_up)
            .try_normalize()
            .unwrap_or_else(|| dop.any_orthonormal_vector());
        (right, right.cross(dop))
    }

    /// Rotate the eye about an axis through the focal point.
    fn orbit_about(&mut self, axis: DVec3, degrees: f64) -> DQuat {
        let rotation = DQuat::from_axis_angle(axis, degrees.to_radians());
        self.position =
            self.focal_point + rotation * (self.position - self.focal_point);
        rotation
    }
}

impl CameraModel for OrbitCamera {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    fn focal_point(&self) -> DVec3 {
        self.focal_point
    }

    fn set_focal_point(&mut self, focal_point: DVec3) {
        self.focal_point = focal_point;
    }

    fn view_up(&self) -> DVec3 {
        self.view_up
    }

    fn set_view_up(&mut self, view_up: DVec3) {
        if let Some(up) = view_up.try_normalize() {
            self.view_up = up;
        }
    }

    fn pan(&mut self, right: f64, up: f64) {
        let (right_axis, up_axis) = self.view_basis();
        let translation = right_axis * right + up_axis * up;
        self.position += translation;
        self.focal_point += translation;
    }

    fn dolly(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let distance = self.distance() / factor;
        self.position = self.focal_point - self.direction_of_projection() * distance;
    }

    fn zoom(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        self.view_angle =
            (self.view_angle / factor).clamp(MIN_VIEW_ANGLE, MAX_VIEW_ANGLE);
    }

    fn azimuth(&mut self, degrees: f64) {
        let Some(axis) = self.view_up.try_normalize() else {
            return;
        };
        let _ = self.orbit_about(axis, degrees);
    }

    fn elevation(&mut self, degrees: f64) {
        let (right, up) = self.view_basis();
        // Rotating eye and up together keeps the up vector orthogonal
        // even when passing over the poles.
        let rotation = self.orbit_about(-right, degrees);
        self.view_up = rotation * up;
    }

    fn reset_to_bounds(&mut self, margin: f64) {
        let Some(bounds) = self.bounds else {
            log::debug!("reset_to_bounds without scene bounds, ignoring");
            return;
        };
        let dop = self.direction_of_projection();
        let half_angle = (self.default_view.view_angle.to_radians() * 0.5).sin();
        let radius = bounds.radius().max(f64::EPSILON);
        let margin = if margin > 0.0 { margin } else { 1.0 };
        let distance = radius / half_angle / margin;

        self.view_angle = self.default_view.view_angle;
        self.focal_point = bounds.center();
        self.position = self.focal_point - dop * distance;
    }

    fn reset_to_default(&mut self) {
        let SavedView { pose, view_angle } = self.default_view;
        self.set_pose(&pose);
        self.view_angle = view_angle;
    }

    fn set_current_as_default(&mut self) {
        self.default_view = SavedView {
            pose: self.pose(),
            view_angle: self.view_angle,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{a} != {b}");
    }

    fn unit_box() -> SceneBounds {
        SceneBounds {
            min: DVec3::splat(-1.0),
            max: DVec3::splat(1.0),
        }
    }

    #[test]
    fn azimuth_orbits_about_up_vector() {
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(0.0, 0.0, 10.0));
        cam.azimuth(90.0);
        assert_vec_eq(cam.position(), DVec3::new(10.0, 0.0, 0.0));
        assert_vec_eq(cam.view_up(), DVec3::Y);
    }

    #[test]
    fn elevation_raises_eye_and_keeps_up_orthogonal() {
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(0.0, 0.0, 10.0));
        cam.elevation(90.0);
        assert_vec_eq(cam.position(), DVec3::new(0.0, 10.0, 0.0));
        let dop = (cam.focal_point() - cam.position()).normalize();
        assert!(dop.dot(cam.view_up()).abs() < 1e-9);
        assert!((cam.distance() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn dolly_divides_distance() {
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(0.0, 0.0, 10.0));
        cam.dolly(2.0);
        assert_vec_eq(cam.position(), DVec3::new(0.0, 0.0, 5.0));
        cam.dolly(0.0);
        assert_vec_eq(cam.position(), DVec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn zoom_changes_view_angle_not_position() {
        let mut cam = OrbitCamera::new();
        let before = cam.position();
        cam.zoom(2.0);
        assert_eq!(cam.view_angle(), 15.0);
        assert_vec_eq(cam.position(), before);
    }

    #[test]
    fn pan_moves_eye_and_focal_together() {
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(0.0, 0.0, 10.0));
        cam.pan(1.0, 2.0);
        assert_vec_eq(cam.position(), DVec3::new(1.0, 2.0, 10.0));
        assert_vec_eq(cam.focal_point(), DVec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn reset_to_bounds_frames_center() {
        let mut cam = OrbitCamera::new();
        cam.set_scene_bounds(unit_box());
        cam.reset_to_bounds(0.7);
        assert_vec_eq(cam.focal_point(), DVec3::ZERO);
        let expected = 3f64.sqrt() / 15f64.to_radians().sin() / 0.7;
        assert!((cam.distance() - expected).abs() < 1e-9);
    }

    #[test]
    fn reset_to_bounds_without_bounds_is_noop() {
        let mut cam = OrbitCamera::new();
        let before = cam.pose();
        cam.reset_to_bounds(0.7);
        assert_eq!(cam.pose(), before);
    }

    #[test]
    fn default_view_restores_pose_and_projection() {
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(3.0, 4.0, 5.0));
        cam.set_current_as_default();
        cam.azimuth(40.0);
        cam.zoom(3.0);
        cam.reset_to_default();
        assert_vec_eq(cam.position(), DVec3::new(3.0, 4.0, 5.0));
        assert_eq!(cam.view_angle(), DEFAULT_VIEW_ANGLE);
    }

    #[test]
    fn view_matrix_puts_focal_point_on_negative_z() {
        let mut cam = OrbitCamera::new();
        cam.set_position(DVec3::new(4.0, 3.0, 0.0));
        cam.set_focal_point(DVec3::new(1.0, -1.0, 0.0));
        let view = cam.view_matrix();
        assert_vec_eq(view.transform_point3(cam.focal_point()), DVec3::new(0.0, 0.0, -5.0));
        assert_vec_eq(view.transform_point3(cam.position()), DVec3::ZERO);
    }

    #[test]
    fn projection_tracks_view_angle() {
        let mut cam = OrbitCamera::new();
        let wide = cam.projection_matrix(1.0, 0.1, 100.0);
        cam.zoom(2.0);
        let narrow = cam.projection_matrix(1.0, 0.1, 100.0);
        // y scale is cot(fov / 2)
        let expected = 1.0 / (DEFAULT_VIEW_ANGLE / 2.0).to_radians().tan();
        assert!((wide.y_axis.y - expected).abs() < 1e-9);
        assert!(narrow.y_axis.y > wide.y_axis.y);
    }

    #[test]
    fn degenerate_up_is_rejected() {
        let mut cam = OrbitCamera::new();
        cam.set_view_up(DVec3::ZERO);
        assert_eq!(cam.view_up(), DVec3::Y);
    }
}
