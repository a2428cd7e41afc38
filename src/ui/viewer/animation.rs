// SPDX-License-Identifier: MPL-2.0
//! Time-based tweens for viewer transitions.
//!
//! Transitions are sampled explicitly with an [`Instant`] so the UI tick
//! drives them and tests can step them deterministically.

use iced::Vector;
use std::time::{Duration, Instant};

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vector {
    fn lerp(self, to: Self, t: f32) -> Self {
        Vector::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

/// Ease-out cubic: fast start, gentle settle.
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// A transition from one value to another over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    started: Instant,
    duration: Duration,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    /// Progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Value at `now`; exactly the target once finished.
    pub fn sample(&self, now: Instant) -> T {
        if self.is_finished(now) {
            return self.to;
        }
        self.from.lerp(self.to, ease_out_cubic(self.progress(now)))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_abs_diff_eq!(ease_out_cubic(0.0), 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(ease_out_cubic(1.0), 1.0, epsilon = F32_EPSILON);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn tween_reaches_target_exactly() {
        let start = Instant::now();
        let tween = Tween::new(0.2_f32, 1.0, start, Duration::from_millis(250));

        assert!(!tween.is_finished(start));
        assert_abs_diff_eq!(tween.sample(start), 0.2, epsilon = F32_EPSILON);
        let end = start + Duration::from_millis(250);
        assert!(tween.is_finished(end));
        assert_eq!(tween.sample(end), 1.0);
    }

    #[test]
    fn tween_midpoint_is_between_endpoints() {
        let start = Instant::now();
        let tween = Tween::new(Vector::new(0.0, 100.0), Vector::ZERO, start, Duration::from_millis(100));
        let mid = tween.sample(start + Duration::from_millis(50));
        assert!(mid.y > 0.0 && mid.y < 100.0);
        assert_eq!(mid.x, 0.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let start = Instant::now();
        let tween = Tween::new(0.0_f32, 5.0, start, Duration::ZERO);
        assert!(tween.is_finished(start));
        assert_eq!(tween.sample(start), 5.0);
    }
}
