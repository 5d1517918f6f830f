use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
/// Scene animation playback parameters.
pub struct PlaybackOptions {
    /// Playback speed multiplier.
    #[schemars(title = "Speed", range(min = 0.1, max = 4.0), extend("step" = 0.1))]
    pub speed: f64,
    /// Interval between clock ticks the host should schedule, in ms.
    #[schemars(skip)]
    pub tick_interval_ms: u64,
    /// Start playing as soon as an animated scene loads.
    #[schemars(title = "Autoplay")]
    pub autoplay: bool,
}

impl PlaybackOptions {
    /// Tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            // ~60 Hz
            tick_interval_ms: 16,
            autoplay: true,
        }
    }
}
