// SPDX-License-Identifier: MPL-2.0
//! Scale and translation applied to a page, plus the eased transition back
//! to identity.

use crate::config::MIN_SCALE;
use iced::{Point, Rectangle, Vector};
use std::time::{Duration, Instant};

/// Translate-then-scale transform about the center of the page container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub translation: Vector,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: MIN_SCALE,
        translation: Vector::ZERO,
    };

    /// Whether the page is enlarged past its fitted size.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_SCALE
    }

    /// Linear interpolation between two transforms, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            scale: self.scale + (to.scale - self.scale) * t,
            translation: Vector::new(
                self.translation.x + (to.translation.x - self.translation.x) * t,
                self.translation.y + (to.translation.y - self.translation.y) * t,
            ),
        }
    }

    /// Maps `content` (laid out inside a container centered on `origin`).
    ///
    /// A point `p` lands on `origin + translation + scale * (p - origin)`.
    #[must_use]
    pub fn apply(&self, content: Rectangle, origin: Point) -> Rectangle {
        Rectangle {
            x: origin.x + self.translation.x + self.scale * (content.x - origin.x),
            y: origin.y + self.translation.y + self.scale * (content.y - origin.y),
            width: content.width * self.scale,
            height: content.height * self.scale,
        }
    }
}

/// Cubic ease-out, `t` in `[0, 1]`.
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// An eased animation between two transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: Transform,
    to: Transform,
    started_at: Instant,
    duration: Duration,
}

impl Transition {
    #[must_use]
    pub fn new(from: Transform, to: Transform, started_at: Instant, duration: Duration) -> Self {
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

    /// Transform to draw at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> Transform {
        self.from.lerp(self.to, ease_out(self.progress(now)))
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn identity_keeps_content_in_place() {
        let content = Rectangle::new(Point::new(10.0, 20.0), iced::Size::new(100.0, 50.0));
        let mapped = Transform::IDENTITY.apply(content, Point::new(60.0, 45.0));
        assert_eq!(mapped, content);
    }

    #[test]
    fn apply_scales_about_origin_then_translates() {
        let content = Rectangle::new(Point::new(0.0, 0.0), iced::Size::new(100.0, 100.0));
        let transform = Transform {
            scale: 2.0,
            translation: Vector::new(30.0, -10.0),
        };
        let mapped = transform.apply(content, Point::new(50.0, 50.0));

        assert_abs_diff_eq!(mapped.x, -20.0);
        assert_abs_diff_eq!(mapped.y, -60.0);
        assert_abs_diff_eq!(mapped.width, 200.0);
        assert_abs_diff_eq!(mapped.height, 200.0);
    }

    #[test]
    fn ease_out_hits_endpoints() {
        assert_abs_diff_eq!(ease_out(0.0), 0.0);
        assert_abs_diff_eq!(ease_out(1.0), 1.0);
        assert!(ease_out(0.5) > 0.5);
        assert_abs_diff_eq!(ease_out(2.0), 1.0);
    }

    #[test]
    fn transition_reaches_target() {
        let start = Instant::now();
        let from = Transform {
            scale: 3.0,
            translation: Vector::new(40.0, 40.0),
        };
        let transition =
            Transition::new(from, Transform::IDENTITY, start, Duration::from_millis(300));

        assert_eq!(transition.sample(start), from);
        assert!(!transition.is_finished(start));

        let end = start + Duration::from_millis(300);
        assert_eq!(transition.sample(end), Transform::IDENTITY);
        assert!(transition.is_finished(end));
    }

    #[test]
    fn zero_duration_transition_is_immediate() {
        let start = Instant::now();
        let transition = Transition::new(
            Transform {
                scale: 2.0,
                translation: Vector::ZERO,
            },
            Transform::IDENTITY,
            start,
            Duration::ZERO,
        );
        assert!(transition.is_finished(start));
        assert_eq!(transition.sample(start), Transform::IDENTITY);
    }
}
