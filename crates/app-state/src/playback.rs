//! Playback cursor: logical time, play flag, timeline zoom and duration.
//!
//! Every write clamps: time to `[0, duration_ms]`, zoom to the configured bounds.

use serde::{Deserialize, Serialize};
use sf_common::ZoomConfig;

use crate::timeline::Timeline;

/// Whatever plays the timeline's media. The editor calls it when an action
/// must stop playback before returning, such as opening a clip-edit session.
pub trait Transport {
    /// Stop every element now and leave the cursor paused at the current
    /// playback position.
    fn interrupt_playback(&mut self, timeline: &Timeline, cursor: &mut PlaybackCursor);
}

/// A host without media elements: only the cursor needs stopping.
impl Transport for () {
    fn interrupt_playback(&mut self, _timeline: &Timeline, cursor: &mut PlaybackCursor) {
        cursor.set_playing(false);
    }
}

/// Shared playback position observed by the timeline, preview and engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackCursor {
    current_time_ms: f64,
    is_playing: bool,
    zoom: f64,
    duration_ms: u64,
    #[serde(skip, default)]
    zoom_limits: ZoomConfig,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new(15_000, ZoomConfig::default())
    }
}

impl PlaybackCursor {
    /// Create a paused cursor at 0 with zoom 1.
    ///
    /// Limits that are inverted, non-positive or NaN are replaced by the defaults.
    pub fn new(duration_ms: u64, zoom_limits: ZoomConfig) -> Self {
        let zoom_limits = usable_limits(zoom_limits);
        Self {
            current_time_ms: 0.0,
            is_playing: false,
            zoom: 1.0_f64.clamp(zoom_limits.min, zoom_limits.max),
            duration_ms,
            zoom_limits,
        }
    }

    pub fn current_time_ms(&self) -> f64 {
        self.current_time_ms
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Move the cursor. Non-finite input is treated as 0.
    pub fn set_current_time(&mut self, ms: f64) {
        let ms = if ms.is_finite() { ms } else { 0.0 };
        self.current_time_ms = ms.clamp(0.0, self.duration_ms as f64);
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            tracing::debug!(playing, time_ms = self.current_time_ms, "Play state changed");
        }
        self.is_playing = playing;
    }

    /// Change the timeline duration, pulling the cursor back inside if needed.
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.set_current_time(self.current_time_ms);
        tracing::debug!(duration_ms, "Timeline duration set");
    }

    /// Grow the duration to at least `duration_ms`.
    pub fn extend_duration(&mut self, duration_ms: u64) {
        if duration_ms > self.duration_ms {
            self.set_duration(duration_ms);
        }
    }

    /// Set zoom, clamped to the configured bounds. NaN leaves zoom unchanged.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(self.zoom_limits.min, self.zoom_limits.max);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.zoom_limits.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.zoom_limits.step);
    }

    /// Back to time 0, paused. Zoom and duration are kept.
    pub fn rewind(&mut self) {
        self.current_time_ms = 0.0;
        self.is_playing = false;
    }

    pub fn zoom_limits(&self) -> &ZoomConfig {
        &self.zoom_limits
    }
}

fn usable_limits(limits: ZoomConfig) -> ZoomConfig {
    if limits.min > 0.0 && limits.min <= limits.max {
        return limits;
    }
    tracing::warn!(min = limits.min, max = limits.max, "Unusable zoom limits, using defaults");
    ZoomConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cursor_defaults() {
        let c = PlaybackCursor::default();
        assert_eq!(c.current_time_ms(), 0.0);
        assert!(!c.is_playing());
        assert_eq!(c.zoom(), 1.0);
        assert_eq!(c.duration_ms(), 15_000);
    }

    #[test]
    fn time_is_clamped() {
        let mut c = PlaybackCursor::default();
        c.set_current_time(-50.0);
        assert_eq!(c.current_time_ms(), 0.0);
        c.set_current_time(99_999.0);
        assert_eq!(c.current_time_ms(), 15_000.0);
        c.set_current_time(f64::NAN);
        assert_eq!(c.current_time_ms(), 0.0);
    }

    #[test]
    fn shrinking_duration_pulls_cursor_back() {
        let mut c = PlaybackCursor::default();
        c.set_current_time(12_000.0);
        c.set_duration(10_000);
        assert_eq!(c.current_time_ms(), 10_000.0);

        c.extend_duration(5_000);
        assert_eq!(c.duration_ms(), 10_000);
        c.extend_duration(20_000);
        assert_eq!(c.duration_ms(), 20_000);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = PlaybackCursor::default();
        c.set_zoom(100.0);
        assert_eq!(c.zoom(), 10.0);
        c.set_zoom(0.0);
        assert_eq!(c.zoom(), 0.1);
        c.set_zoom(f64::NEG_INFINITY);
        assert_eq!(c.zoom(), 0.1);
        c.set_zoom(f64::NAN);
        assert_eq!(c.zoom(), 0.1);
    }

    #[test]
    fn zoom_in_out_are_inverse() {
        let mut c = PlaybackCursor::default();
        c.set_zoom(2.0);
        c.zoom_in();
        assert!((c.zoom() - 2.5).abs() < 1e-12);
        c.zoom_out();
        assert!((c.zoom() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rewind_keeps_zoom() {
        let mut c = PlaybackCursor::default();
        c.set_zoom(3.0);
        c.set_current_time(4_000.0);
        c.set_playing(true);
        c.rewind();
        assert_eq!(c.current_time_ms(), 0.0);
        assert!(!c.is_playing());
        assert_eq!(c.zoom(), 3.0);
    }

    #[test]
    fn unusable_zoom_limits_fall_back_to_defaults() {
        let inverted = ZoomConfig {
            min: 5.0,
            max: 1.0,
            step: 1.25,
        };
        let mut c = PlaybackCursor::new(15_000, inverted);
        assert_eq!(c.zoom_limits(), &ZoomConfig::default());
        assert_eq!(c.zoom(), 1.0);
        c.set_zoom(50.0);
        assert_eq!(c.zoom(), 10.0);

        let nan = ZoomConfig {
            min: f64::NAN,
            ..ZoomConfig::default()
        };
        assert_eq!(PlaybackCursor::new(15_000, nan).zoom(), 1.0);
    }
}
