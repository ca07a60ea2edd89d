// SPDX-License-Identifier: MPL-2.0
//! Eased horizontal scrolling and idle detection for snapping.

use crate::ui::zoomable::transform::ease_out;
use std::time::{Duration, Instant};

/// Animated move of the track offset between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Offset to apply at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> f32 {
        self.from + (self.to - self.from) * ease_out(self.progress(now))
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Tracks the last user scroll so a snap can run once scrolling goes quiet.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleTimer {
    last_activity: Option<Instant>,
}

impl IdleTimer {
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = Some(now);
    }

    pub fn cancel(&mut self) {
        self.last_activity = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.last_activity.is_some()
    }

    /// Returns true once, when `idle` has elapsed since the last activity.
    pub fn fire(&mut self, now: Instant, idle: Duration) -> bool {
        match self.last_activity {
            Some(at) if now.saturating_duration_since(at) >= idle => {
                self.last_activity = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn animation_moves_monotonically_to_target() {
        let start = Instant::now();
        let animation = ScrollAnimation::new(0.0, 800.0, start, Duration::from_millis(300));

        let mut previous = animation.sample(start);
        assert_abs_diff_eq!(previous, 0.0);
        for ms in (30..=300).step_by(30) {
            let value = animation.sample(start + Duration::from_millis(ms));
            assert!(value >= previous);
            previous = value;
        }
        assert_abs_diff_eq!(previous, 800.0);
        assert!(animation.is_finished(start + Duration::from_millis(300)));
    }

    #[test]
    fn backwards_animation_reaches_target() {
        let start = Instant::now();
        let animation = ScrollAnimation::new(1600.0, 800.0, start, Duration::from_millis(300));
        assert_abs_diff_eq!(animation.sample(start + Duration::from_secs(1)), 800.0);
    }

    #[test]
    fn idle_timer_fires_once_after_delay() {
        let start = Instant::now();
        let idle = Duration::from_millis(150);
        let mut timer = IdleTimer::default();
        assert!(!timer.fire(start, idle));

        timer.touch(start);
        assert!(timer.is_pending());
        assert!(!timer.fire(start + Duration::from_millis(100), idle));
        assert!(timer.fire(start + Duration::from_millis(150), idle));
        assert!(!timer.fire(start + Duration::from_millis(400), idle));
        assert!(!timer.is_pending());
    }

    #[test]
    fn new_activity_restarts_the_delay() {
        let start = Instant::now();
        let idle = Duration::from_millis(150);
        let mut timer = IdleTimer::default();

        timer.touch(start);
        timer.touch(start + Duration::from_millis(100));
        assert!(!timer.fire(start + Duration::from_millis(200), idle));
        assert!(timer.fire(start + Duration::from_millis(250), idle));
    }
}
