//! Logical clock source selection and fixed-rate throttles.
//!
//! While a video clip is playing its element is the master clock: logical time
//! is the element position plus the clip's timeline start. Without one the
//! engine falls back to wall-clock deltas between ticks.

use std::time::{Duration, Instant};

/// Which clock drove the latest tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ClockSource {
    /// The playing video element of this clip.
    Video { clip_id: String },
    /// Wall-clock delta since the previous tick.
    #[default]
    WallClock,
}

impl ClockSource {
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }
}

/// Logical playback time in ms, never moving backwards while running.
#[derive(Clone, Debug, Default)]
pub struct LogicalClock {
    time_ms: f64,
    last_tick: Option<Instant>,
}

impl LogicalClock {
    /// Restart the clock at `time_ms` as of `now`.
    pub fn start_at(&mut self, time_ms: f64, now: Instant) {
        self.time_ms = time_ms;
        self.last_tick = Some(now);
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Advance from a video element reading. Readings behind the current
    /// time are ignored.
    pub fn follow_video(&mut self, position_secs: f64, clip_start_ms: u64, now: Instant) -> f64 {
        let reported = position_secs * 1000.0 + clip_start_ms as f64;
        if reported.is_finite() && reported > self.time_ms {
            self.time_ms = reported;
        }
        self.last_tick = Some(now);
        self.time_ms
    }

    /// Advance by the wall-clock time elapsed since the previous tick.
    pub fn advance_wall(&mut self, now: Instant) -> f64 {
        if let Some(last) = self.last_tick {
            self.time_ms += now.saturating_duration_since(last).as_secs_f64() * 1000.0;
        }
        self.last_tick = Some(now);
        self.time_ms
    }

    /// Jump to `time_ms` (explicit seek), backwards included.
    pub fn set(&mut self, time_ms: f64) {
        self.time_ms = time_ms;
    }
}

/// Lets an action through at most once per interval.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Throttle firing `hz` times per second. Non-positive rates fire every
    /// call; rates too slow to represent wait the longest representable interval.
    pub fn per_second(hz: f64) -> Self {
        let interval = if hz.is_finite() && hz > 0.0 {
            Duration::try_from_secs_f64(1.0 / hz).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the action may run at `now`; if so the interval restarts.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Restart the interval at `now` without firing.
    pub fn arm(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Fire on the next call regardless of timing.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_accumulates_deltas() {
        let t0 = Instant::now();
        let mut clock = LogicalClock::default();
        clock.start_at(1000.0, t0);
        clock.advance_wall(t0 + Duration::from_millis(16));
        let now = clock.advance_wall(t0 + Duration::from_millis(50));
        assert!((now - 1050.0).abs() < 1e-6);
    }

    #[test]
    fn video_reading_never_moves_backwards() {
        let t0 = Instant::now();
        let mut clock = LogicalClock::default();
        clock.start_at(5000.0, t0);
        assert_eq!(clock.follow_video(5.5, 0, t0), 5500.0);
        assert_eq!(clock.follow_video(5.2, 0, t0), 5500.0);
        assert_eq!(clock.follow_video(1.0, 5000, t0), 6000.0);
    }

    #[test]
    fn explicit_set_can_rewind() {
        let mut clock = LogicalClock::default();
        clock.set(9000.0);
        clock.set(100.0);
        assert_eq!(clock.time_ms(), 100.0);
    }

    #[test]
    fn throttle_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut th = Throttle::new(Duration::from_millis(500));
        assert!(th.ready(t0));
        assert!(!th.ready(t0 + Duration::from_millis(499)));
        assert!(th.ready(t0 + Duration::from_millis(500)));
        assert!(!th.ready(t0 + Duration::from_millis(600)));
    }

    #[test]
    fn armed_throttle_waits_a_full_interval() {
        let t0 = Instant::now();
        let mut th = Throttle::new(Duration::from_millis(500));
        th.arm(t0);
        assert!(!th.ready(t0 + Duration::from_millis(100)));
        assert!(th.ready(t0 + Duration::from_millis(500)));
        th.reset();
        assert!(th.ready(t0 + Duration::from_millis(501)));
    }

    #[test]
    fn per_second_rate() {
        let th = Throttle::per_second(30.0);
        assert_eq!(th.interval().as_micros(), 33_333);
        assert_eq!(Throttle::per_second(0.0).interval(), Duration::ZERO);
    }

    #[test]
    fn vanishing_rate_does_not_overflow() {
        let t0 = Instant::now();
        let mut th = Throttle::per_second(1e-20);
        assert_eq!(th.interval(), Duration::MAX);
        assert!(th.ready(t0));
        assert!(!th.ready(t0 + Duration::from_secs(3600)));
    }
}
