use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::transition::DEFAULT_TRANSITION_DURATION;
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera interaction sensitivities and view-snap parameters.
pub struct CameraOptions {
    /// Orbit and roll angle per dragged pixel, in degrees.
    #[schemars(title = "Rotate Speed", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f64,
    /// Pan distance per pixel as a fraction of the eye distance.
    #[schemars(title = "Pan Speed", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub pan_factor: f64,
    /// Sensitivity multiplier applied while the fine modifier is held.
    #[schemars(title = "Fine Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub fine_factor: f64,
    /// Dolly fraction per vertically dragged pixel.
    #[schemars(title = "Dolly Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub dolly_speed: f64,
    /// Zoom fraction per wheel tick.
    #[schemars(title = "Wheel Zoom", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub wheel_factor: f64,
    /// Length of a view snap in milliseconds.
    #[schemars(title = "Transition (ms)", range(min = 0, max = 2000), extend("step" = 50))]
    pub transition_ms: u64,
    /// Easing curve for view snaps.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// Azimuth applied after framing a freshly loaded scene.
    #[schemars(skip)]
    pub initial_azimuth: f64,
    /// Elevation applied after framing a freshly loaded scene.
    #[schemars(skip)]
    pub initial_elevation: f64,
    /// Framing margin passed to `reset_to_bounds` on load.
    #[schemars(skip)]
    pub bounds_margin: f64,
}

impl CameraOptions {
    /// View-snap length as a [`Duration`].
    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 0.5,
            pan_factor: 0.001,
            fine_factor: 0.1,
            dolly_speed: 0.01,
            wheel_factor: 0.001,
            transition_ms: DEFAULT_TRANSITION_DURATION.as_millis() as u64,
            easing: EasingFunction::DEFAULT,
            initial_azimuth: 45.0,
            initial_elevation: 30.0,
            bounds_margin: 0.7,
        }
    }
}
