use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Position, focal point and up vector defining a view transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: DVec3,
    /// Look-at point in world space.
    pub focal_point: DVec3,
    /// Up direction.
    pub view_up: DVec3,
}

impl CameraPose {
    /// Distance between the eye and the focal point.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.position.distance(self.focal_point)
    }

    /// Unit vector from the eye toward the focal point, or `None` when the
    /// two coincide.
    #[must_use]
    pub fn direction_of_projection(&self) -> Option<DVec3> {
        (self.focal_point - self.position).try_normalize()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 1.0),
            focal_point: DVec3::ZERO,
            view_up: DVec3::Y,
        }
    }
}

/// The six axis-aligned snap views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CameraView {
    /// Looking along -Z.
    Front,
    /// Looking along +Z.
    Back,
    /// Looking along -X.
    Left,
    /// Looking along +X.
    Right,
    /// Looking down -Y, up is +Z.
    Top,
    /// Looking up +Y, up is -Z.
    Bottom,
}

impl CameraView {
    /// All views in key order (1..=6).
    pub const ALL: [CameraView; 6] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
    ];

    /// Direction the camera looks in for this view.
    #[must_use]
    pub fn look_direction(self) -> DVec3 {
        match self {
            Self::Front => DVec3::NEG_Z,
            Self::Back => DVec3::Z,
            Self::Left => DVec3::NEG_X,
            Self::Right => DVec3::X,
            Self::Top => DVec3::NEG_Y,
            Self::Bottom => DVec3::Y,
        }
    }

    /// Up vector the view settles on.
    #[must_use]
    pub fn view_up(self) -> DVec3 {
        match self {
            Self::Top => DVec3::Z,
            Self::Bottom => DVec3::NEG_Z,
            _ => DVec3::Y,
        }
    }

    /// Pose reached by snapping `current` to this view while keeping its
    /// focal point and eye distance.
    #[must_use]
    pub fn target_pose(self, current: &CameraPose) -> CameraPose {
        let distance = current.distance();
        CameraPose {
            position: current.focal_point - self.look_direction() * distance,
            focal_point: current.focal_point,
            view_up: self.view_up(),
        }
    }

    /// Lowercase view name, as used by sidebar buttons.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Parse a view name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|view| view.name().eq_ignore_ascii_case(name))
    }
}
