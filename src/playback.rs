//! Scene animation clock.
//!
//! The host drives the clock: [`AnimationClock::tick`] with the elapsed
//! time since the previous tick, or [`AnimationClock::tick_at`] with a
//! wall-clock instant. Each running tick yields the absolute scene time the
//! engine should be posed at.

use std::time::Duration;

use web_time::Instant;

use crate::options::PlaybackOptions;

/// Playback position within the scene's animation range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationCursor {
    /// Seconds since the start of the range, in `[0, duration)`.
    pub position: f64,
    /// Playback speed multiplier.
    pub speed: f64,
    /// Whether ticks advance the cursor.
    pub playing: bool,
}

/// Advances an [`AnimationCursor`] and wraps it at the scene duration.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    cursor: AnimationCursor,
    range_start: f64,
    duration: f64,
    autoplay: bool,
    last_tick: Option<Instant>,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(&PlaybackOptions::default())
    }
}

impl AnimationClock {
    /// Stopped clock with no animation range.
    #[must_use]
    pub fn new(options: &PlaybackOptions) -> Self {
        Self {
            cursor: AnimationCursor {
                position: 0.0,
                speed: options.speed,
                playing: false,
            },
            range_start: 0.0,
            duration: 0.0,
            autoplay: options.autoplay,
            last_tick: None,
        }
    }

    /// Take speed and autoplay from `options`. Position and play state are
    /// kept.
    pub fn apply_options(&mut self, options: &PlaybackOptions) {
        self.cursor.speed = options.speed;
        self.autoplay = options.autoplay;
    }

    /// Arm the clock for a freshly loaded scene with time range
    /// `(start, end)`. The cursor rewinds; playback begins when the range
    /// is non-empty and autoplay is on. Returns whether the scene is
    /// animated.
    pub fn start(&mut self, (start, end): (f64, f64)) -> bool {
        let duration = end - start;
        self.range_start = start;
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        self.cursor.position = 0.0;
        self.last_tick = None;
        self.cursor.playing = self.autoplay && self.has_animation();
        log::debug!(
            "animation clock armed: duration {:.3}s, playing {}",
            self.duration,
            self.cursor.playing
        );
        self.has_animation()
    }

    /// Whether the loaded scene has a non-empty time range.
    #[must_use]
    pub fn has_animation(&self) -> bool {
        self.duration > 0.0
    }

    /// Length of the time range in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether ticks currently advance the cursor.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.cursor.playing
    }

    /// Current cursor state.
    #[must_use]
    pub fn cursor(&self) -> AnimationCursor {
        self.cursor
    }

    /// Absolute scene time at the cursor.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.range_start + self.cursor.position
    }

    /// Change the speed multiplier.
    pub fn set_speed(&mut self, speed: f64) {
        self.cursor.speed = speed;
    }

    /// Play or pause. Playing a scene with no animation is refused; pausing
    /// is always accepted. Returns whether the request took effect.
    pub fn set_playing(&mut self, playing: bool) -> bool {
        if playing && !self.has_animation() {
            log::debug!("play requested on a scene without animation, ignoring");
            return false;
        }
        if self.cursor.playing != playing {
            log::debug!("animation {}", if playing { "playing" } else { "paused" });
        }
        self.cursor.playing = playing;
        self.last_tick = None;
        true
    }

    /// Flip play/pause. Returns the resulting play state.
    pub fn toggle_playing(&mut self) -> bool {
        let _ = self.set_playing(!self.cursor.playing);
        self.cursor.playing
    }

    /// Pause and rewind. Returns the scene time to load, or `None` when the
    /// scene has no animation.
    pub fn reset(&mut self) -> Option<f64> {
        self.cursor.playing = false;
        self.cursor.position = 0.0;
        self.last_tick = None;
        self.has_animation().then(|| self.current_time())
    }

    /// Advance by `elapsed`. Returns the absolute scene time to load, or
    /// `None` while paused or without animation.
    pub fn tick(&mut self, elapsed: Duration) -> Option<f64> {
        if !self.cursor.playing || !self.has_animation() {
            return None;
        }
        let advanced =
            self.cursor.position + elapsed.as_secs_f64() * self.cursor.speed;
        self.cursor.position = advanced.rem_euclid(self.duration);
        Some(self.current_time())
    }

    /// Advance by the wall-clock time since the previous `tick_at`. The
    /// first call after starting or resuming only records `now`.
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.tick(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_with_speed(speed: f64) -> AnimationClock {
        AnimationClock::new(&PlaybackOptions {
            speed,
            ..PlaybackOptions::default()
        })
    }

    #[test]
    fn cursor_wraps_modulo_duration() {
        let mut clock = clock_with_speed(1.5);
        assert!(clock.start((0.0, 2.0)));
        assert!(clock.is_playing());

        let dt = Duration::from_millis(16);
        let mut last = None;
        for _ in 0..100 {
            last = clock.tick(dt);
        }
        // 100 * 0.016 * 1.5 = 2.4, wrapped at 2.0
        let expected = (100.0 * 0.016 * 1.5) % 2.0;
        assert!((clock.cursor().position - expected).abs() < 1e-9);
        assert!((last.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn loaded_time_is_offset_by_range_start() {
        let mut clock = clock_with_speed(1.0);
        assert!(clock.start((10.0, 12.0)));
        let t = clock.tick(Duration::from_millis(2500)).unwrap();
        assert!((t - 10.5).abs() < 1e-9);
    }

    #[test]
    fn empty_range_never_plays() {
        let mut clock = AnimationClock::default();
        assert!(!clock.start((0.0, 0.0)));
        assert!(!clock.is_playing());
        assert!(!clock.set_playing(true));
        assert!(!clock.toggle_playing());
        assert!(clock.tick(Duration::from_secs(1)).is_none());
        assert_eq!(clock.cursor().position, 0.0);
        // Pausing is always accepted.
        assert!(clock.set_playing(false));
    }

    #[test]
    fn paused_clock_holds_position() {
        let mut clock = AnimationClock::default();
        let _ = clock.start((0.0, 4.0));
        let _ = clock.tick(Duration::from_secs(1));
        assert!(!clock.toggle_playing());
        assert!(clock.tick(Duration::from_secs(1)).is_none());
        assert!((clock.cursor().position - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reset_pauses_and_rewinds() {
        let mut clock = AnimationClock::default();
        let _ = clock.start((1.0, 3.0));
        let _ = clock.tick(Duration::from_millis(700));
        assert_eq!(clock.reset(), Some(1.0));
        assert!(!clock.is_playing());
        assert_eq!(clock.cursor().position, 0.0);
    }

    #[test]
    fn autoplay_off_arms_paused() {
        let mut clock = AnimationClock::new(&PlaybackOptions {
            autoplay: false,
            ..PlaybackOptions::default()
        });
        assert!(clock.start((0.0, 1.0)));
        assert!(!clock.is_playing());
        assert!(clock.set_playing(true));
    }

    #[test]
    fn speed_change_scales_later_steps() {
        let mut clock = clock_with_speed(1.0);
        let _ = clock.start((0.0, 100.0));
        let _ = clock.tick(Duration::from_secs(1));
        clock.set_speed(3.0);
        let t = clock.tick(Duration::from_secs(1)).unwrap();
        assert!((t - 4.0).abs() < 1e-9);
        assert!(clock.is_playing());
    }

    #[test]
    fn tick_at_measures_wall_clock_gaps() {
        let mut clock = AnimationClock::default();
        let _ = clock.start((0.0, 10.0));
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0), Some(0.0));
        let t = clock.tick_at(t0 + Duration::from_millis(250)).unwrap();
        assert!((t - 0.25).abs() < 1e-9);
    }
}
