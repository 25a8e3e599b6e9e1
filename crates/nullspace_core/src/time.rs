//! Frame timing.
//!
//! The runner owns one [`TimeClock`] and ticks it at the start of every
//! frame; the resulting [`Time`] snapshot is what scene objects and the
//! camera see.

use std::time::{Duration, Instant};

/// Longest frame the clock reports.  A window drag or breakpoint would
/// otherwise hand the simulation a multi-second step.
pub const MAX_DELTA: f32 = 0.1;

/// Timing information for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds since the previous frame, clamped to [`MAX_DELTA`].
    pub delta: f32,
    /// Seconds since the clock was created.
    pub elapsed: f64,
    /// Index of this frame, starting at 0.
    pub frame_count: u64,
    /// Instantaneous frames-per-second derived from `delta`.
    pub fps: f32,
}

impl Time {
    /// A fixed-step snapshot, handy for headless stepping.
    pub fn fixed(delta: f32, frame_count: u64) -> Self {
        Self {
            delta,
            elapsed: delta as f64 * frame_count as f64,
            frame_count,
            fps: if delta > 0.0 { 1.0 / delta } else { 0.0 },
        }
    }
}

/// Stateful timer producing [`Time`] snapshots.
#[derive(Debug, Clone)]
pub struct TimeClock {
    start: Instant,
    last_tick: Instant,
    frame_count: u64,
}

impl TimeClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_tick: start,
            frame_count: 0,
        }
    }

    /// Snapshot for "now" without advancing the frame counter.
    pub fn peek(&self) -> Time {
        self.snapshot(Instant::now())
    }

    /// Advances one frame and returns its snapshot.
    pub fn tick(&mut self) -> Time {
        self.tick_at(Instant::now())
    }

    /// Same as [`TimeClock::tick`] with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> Time {
        let time = self.snapshot(now);
        self.last_tick = now;
        self.frame_count += 1;
        time
    }

    fn snapshot(&self, now: Instant) -> Time {
        let raw = now.saturating_duration_since(self.last_tick);
        let delta = raw.min(Duration::from_secs_f32(MAX_DELTA)).as_secs_f32();
        Time {
            delta,
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
            frame_count: self.frame_count,
            fps: if delta > 0.0 { 1.0 / delta } else { 0.0 },
        }
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_measures_and_counts() {
        let start = Instant::now();
        let mut clock = TimeClock::starting_at(start);

        let first = clock.tick_at(start + Duration::from_millis(20));
        assert_eq!(first.frame_count, 0);
        assert!((first.delta - 0.02).abs() < 1e-6);
        assert!((first.fps - 50.0).abs() < 1e-2);

        let second = clock.tick_at(start + Duration::from_millis(30));
        assert_eq!(second.frame_count, 1);
        assert!((second.delta - 0.01).abs() < 1e-6);
        assert!((second.elapsed - 0.03).abs() < 1e-9);
    }

    #[test]
    fn long_frames_are_clamped() {
        let start = Instant::now();
        let mut clock = TimeClock::starting_at(start);
        let t = clock.tick_at(start + Duration::from_secs(3));
        assert!((t.delta - MAX_DELTA).abs() < 1e-6);
        assert!((t.elapsed - 3.0).abs() < 1e-9);
    }

    #[test]
    fn peek_does_not_advance() {
        let clock = TimeClock::new();
        assert_eq!(clock.peek().frame_count, 0);
        assert_eq!(clock.peek().frame_count, 0);
    }

    #[test]
    fn fixed_snapshot() {
        let t = Time::fixed(0.01, 10);
        assert!((t.elapsed - 0.1).abs() < 1e-6);
        assert!((t.fps - 100.0).abs() < 1e-3);
        assert_eq!(Time::fixed(0.0, 0).fps, 0.0);
    }
}
