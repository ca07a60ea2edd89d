// SPDX-License-Identifier: MPL-2.0
//! Pan and pinch-zoom state for a single page.
//!
//! One finger (or the left mouse button) pans a zoomed page, two fingers
//! pinch, and a quick second tap resets. The rendered transform eases back
//! to identity whenever the target scale returns to 1 on a painted image.

pub mod pointers;
pub mod transform;

pub use pointers::{ActivePointers, PointerId};
pub use transform::{Transform, Transition};

use crate::config::{ZoomConfig, DOUBLE_TAP_THRESHOLD_MS, MIN_SCALE};
use iced::{Point, Vector};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Time window in which a second press counts as a double tap.
const DOUBLE_TAP_THRESHOLD: Duration = Duration::from_millis(DOUBLE_TAP_THRESHOLD_MS);

/// Movement beyond this distance turns a press into a drag, not a tap.
const TAP_SLOP: f32 = 10.0;

/// Tunables read from the `[zoom]` config section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub max_scale: f32,
    pub pinch_sensitivity: f32,
    pub transition: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&ZoomConfig::default())
    }
}

impl Settings {
    #[must_use]
    pub fn from_config(config: &ZoomConfig) -> Self {
        Self {
            max_scale: config.max_scale(),
            pinch_sensitivity: config.pinch_sensitivity(),
            transition: config.transition(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Panning { start: Point },
    Pinching { baseline: f32 },
}

#[derive(Debug, Clone)]
pub enum Message {
    PointerPressed { id: PointerId, position: Point },
    PointerMoved { id: PointerId, position: Point },
    PointerLifted { id: PointerId },
    /// The decoded image has been drawn at least once.
    Painted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Scale or translation changed.
    TransformChanged,
    /// A double tap restored identity.
    Reset,
}

/// Zoom sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    transform: Transform,
    /// Translation committed when the last pan ended.
    pan_baseline: Vector,
    gesture: Gesture,
    pointers: ActivePointers,
    last_tap: Option<Instant>,
    tap_origin: Option<Point>,
    painted: bool,
    source: Option<PathBuf>,
    transition: Option<Transition>,
    settings: Settings,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl State {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            transform: Transform::IDENTITY,
            pan_baseline: Vector::ZERO,
            gesture: Gesture::Idle,
            pointers: ActivePointers::default(),
            last_tap: None,
            tap_origin: None,
            painted: false,
            source: None,
            transition: None,
            settings,
        }
    }

    /// Handle a zoom message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        self.handle_at(msg, Instant::now())
    }

    /// Same as [`State::handle`] with an explicit clock.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_at(&mut self, msg: Message, now: Instant) -> Effect {
        match msg {
            Message::PointerPressed { id, position } => self.on_press(id, position, now),
            Message::PointerMoved { id, position } => self.on_move(id, position, now),
            Message::PointerLifted { id } => {
                self.on_lift(id);
                Effect::None
            }
            Message::Painted => {
                self.painted = true;
                Effect::None
            }
        }
    }

    fn on_press(&mut self, id: PointerId, position: Point, now: Instant) -> Effect {
        self.pointers.press(id, position);

        match self.pointers.len() {
            1 => {
                let is_double_tap = self
                    .last_tap
                    .is_some_and(|t| now.saturating_duration_since(t) < DOUBLE_TAP_THRESHOLD);

                if is_double_tap {
                    self.last_tap = None;
                    self.tap_origin = None;
                    self.reset_at(now);
                    return Effect::Reset;
                }

                self.last_tap = Some(now);
                self.tap_origin = Some(position);

                if self.transform.is_zoomed() {
                    self.gesture = Gesture::Panning { start: position };
                }
                Effect::None
            }
            2 => {
                self.last_tap = None;
                self.tap_origin = None;
                // Freeze the pan so the next pan resumes from here.
                self.pan_baseline = self.transform.translation;
                if let Some(baseline) = self.pointers.pair_distance() {
                    self.gesture = Gesture::Pinching { baseline };
                }
                Effect::None
            }
            _ => Effect::None,
        }
    }

    fn on_move(&mut self, id: PointerId, position: Point, now: Instant) -> Effect {
        if !self.pointers.move_to(id, position) {
            return Effect::None;
        }

        if self
            .tap_origin
            .is_some_and(|origin| origin.distance(position) > TAP_SLOP)
        {
            self.last_tap = None;
            self.tap_origin = None;
        }

        match self.gesture {
            Gesture::Panning { start } if self.pointers.len() == 1 => {
                let target = Transform {
                    scale: self.transform.scale,
                    translation: self.pan_baseline + (position - start),
                };
                changed_effect(self.commit(target, now))
            }
            Gesture::Pinching { baseline } => {
                let Some(distance) = self.pointers.pair_distance() else {
                    return Effect::None;
                };
                self.gesture = Gesture::Pinching { baseline: distance };

                let scale = (self.transform.scale
                    + (distance - baseline) * self.settings.pinch_sensitivity)
                    .clamp(MIN_SCALE, self.settings.max_scale);

                let translation = if scale <= MIN_SCALE {
                    Vector::ZERO
                } else {
                    self.transform.translation
                };
                self.pan_baseline = translation;

                changed_effect(self.commit(Transform { scale, translation }, now))
            }
            _ => Effect::None,
        }
    }

    fn on_lift(&mut self, id: PointerId) {
        if !self.pointers.lift(id) {
            return;
        }

        match self.gesture {
            Gesture::Panning { .. } if self.pointers.is_empty() => self.settle(),
            // The remaining finger does not start a pan until pressed again.
            Gesture::Pinching { .. } if self.pointers.len() < 2 => self.settle(),
            _ => {}
        }
    }

    fn settle(&mut self) {
        self.pan_baseline = self.transform.translation;
        self.gesture = Gesture::Idle;
    }

    /// Applies a new target transform, easing when it returns to scale 1.
    fn commit(&mut self, target: Transform, now: Instant) -> bool {
        if target == self.transform {
            return false;
        }

        let animate =
            self.painted && target.scale <= MIN_SCALE && !self.settings.transition.is_zero();
        self.transition = animate.then(|| {
            Transition::new(
                self.rendered_transform(now),
                target,
                now,
                self.settings.transition,
            )
        });
        self.transform = target;
        true
    }

    fn reset_at(&mut self, now: Instant) {
        self.commit(Transform::IDENTITY, now);
        self.pan_baseline = Vector::ZERO;
        self.gesture = Gesture::Idle;
    }

    /// Points the component at a new image.
    ///
    /// A different source drops every gesture and snaps back to identity
    /// without animation. Returns whether the source changed.
    pub fn set_source(&mut self, source: &Path) -> bool {
        if self.source.as_deref() == Some(source) {
            return false;
        }
        let settings = self.settings;
        *self = Self::new(settings);
        self.source = Some(source.to_path_buf());
        true
    }

    /// Drops pointer state without touching the transform.
    ///
    /// Used when the page scrolls away mid-gesture and lift events may never
    /// arrive.
    pub fn cancel_gesture(&mut self) {
        self.pointers.clear();
        self.last_tap = None;
        self.tap_origin = None;
        self.settle();
    }

    /// Advances the reset animation. Returns whether it is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self
            .transition
            .as_ref()
            .is_some_and(|transition| transition.is_finished(now))
        {
            self.transition = None;
        }
        self.transition.is_some()
    }

    /// Target transform, ignoring any running animation.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Transform to draw at `now`.
    #[must_use]
    pub fn rendered_transform(&self, now: Instant) -> Transform {
        self.transition
            .as_ref()
            .map_or(self.transform, |transition| transition.sample(now))
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether pointer input belongs to this page rather than the track.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.gesture != Gesture::Idle || self.transform.is_zoomed()
    }

    #[must_use]
    pub fn is_painted(&self) -> bool {
        self.painted
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn changed_effect(changed: bool) -> Effect {
    if changed {
        Effect::TransformChanged
    } else {
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const A: PointerId = PointerId::Finger(1);
    const B: PointerId = PointerId::Finger(2);

    fn press(state: &mut State, id: PointerId, x: f32, y: f32, now: Instant) -> Effect {
        state.handle_at(
            Message::PointerPressed {
                id,
                position: Point::new(x, y),
            },
            now,
        )
    }

    fn move_to(state: &mut State, id: PointerId, x: f32, y: f32, now: Instant) -> Effect {
        state.handle_at(
            Message::PointerMoved {
                id,
                position: Point::new(x, y),
            },
            now,
        )
    }

    fn lift(state: &mut State, id: PointerId, now: Instant) {
        state.handle_at(Message::PointerLifted { id }, now);
    }

    /// Pinches from 100 px apart to `to` px apart and lifts both fingers.
    fn pinch(state: &mut State, to: f32, now: Instant) {
        press(state, A, 0.0, 0.0, now);
        press(state, B, 100.0, 0.0, now);
        move_to(state, B, to, 0.0, now);
        lift(state, A, now);
        lift(state, B, now);
    }

    fn later(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn pinch_then_pan_scenario() {
        let start = Instant::now();
        let mut state = State::default();

        pinch(&mut state, 150.0, start);
        assert_abs_diff_eq!(state.transform().scale, 1.5);
        assert_eq!(state.transform().translation, Vector::ZERO);

        let t = later(start, 1_000);
        press(&mut state, A, 200.0, 200.0, t);
        let effect = move_to(&mut state, A, 230.0, 190.0, t);
        lift(&mut state, A, t);

        assert_eq!(effect, Effect::TransformChanged);
        assert_abs_diff_eq!(state.transform().scale, 1.5);
        assert_eq!(state.transform().translation, Vector::new(30.0, -10.0));
    }

    #[test]
    fn pinch_baseline_follows_each_move() {
        let start = Instant::now();
        let mut state = State::default();
        press(&mut state, A, 0.0, 0.0, start);
        press(&mut state, B, 100.0, 0.0, start);
        move_to(&mut state, B, 120.0, 0.0, start);
        move_to(&mut state, B, 140.0, 0.0, start);
        assert_abs_diff_eq!(state.transform().scale, 1.4, epsilon = 1e-5);
    }

    #[test]
    fn pinch_is_clamped_to_max_scale() {
        let mut state = State::default();
        pinch(&mut state, 2_000.0, Instant::now());
        assert_abs_diff_eq!(state.transform().scale, 5.0);
    }

    #[test]
    fn pinch_below_one_clamps_and_recenters() {
        let start = Instant::now();
        let mut state = State::default();
        pinch(&mut state, 200.0, start);

        let t = later(start, 1_000);
        press(&mut state, A, 0.0, 0.0, t);
        move_to(&mut state, A, 40.0, 20.0, t);
        lift(&mut state, A, t);
        assert_eq!(state.transform().translation, Vector::new(40.0, 20.0));

        let t = later(start, 2_000);
        pinch(&mut state, 0.0, t);
        assert_eq!(state.transform(), Transform::IDENTITY);
    }

    #[test]
    fn pan_is_ignored_at_identity() {
        let start = Instant::now();
        let mut state = State::default();
        press(&mut state, A, 10.0, 10.0, start);
        let effect = move_to(&mut state, A, 80.0, 10.0, start);

        assert_eq!(effect, Effect::None);
        assert_eq!(state.transform(), Transform::IDENTITY);
        assert!(!state.is_capturing());
    }

    #[test]
    fn second_finger_commits_pan_before_pinching() {
        let start = Instant::now();
        let mut state = State::default();
        pinch(&mut state, 200.0, start);

        let t = later(start, 1_000);
        press(&mut state, A, 0.0, 0.0, t);
        move_to(&mut state, A, 20.0, 0.0, t);
        press(&mut state, B, 120.0, 0.0, t);
        lift(&mut state, B, t);
        lift(&mut state, A, t);

        let t = later(start, 2_000);
        press(&mut state, A, 0.0, 0.0, t);
        move_to(&mut state, A, 0.0, 15.0, t);
        assert_eq!(state.transform().translation, Vector::new(20.0, 15.0));
    }

    #[test]
    fn double_tap_resets_transform() {
        let start = Instant::now();
        let mut state = State::default();
        pinch(&mut state, 200.0, start);
        assert!(state.transform().is_zoomed());

        let first = later(start, 1_000);
        press(&mut state, A, 50.0, 50.0, first);
        lift(&mut state, A, first);
        let effect = press(&mut state, A, 50.0, 50.0, later(first, 200));

        assert_eq!(effect, Effect::Reset);
        assert_eq!(state.transform(), Transform::IDENTITY);
    }

    #[test]
    fn double_tap_after_pan_clears_translation_and_baseline() {
        let start = Instant::now();
        let mut state = State::default();
        pinch(&mut state, 200.0, start);

        let panned = later(start, 1_000);
        press(&mut state, A, 100.0, 100.0, panned);
        move_to(&mut state, A, 160.0, 130.0, panned);
        lift(&mut state, A, panned);
        assert_eq!(state.transform().translation, Vector::new(60.0, 30.0));

        let first = later(start, 2_000);
        press(&mut state, A, 80.0, 80.0, first);
        lift(&mut state, A, first);
        let effect = press(&mut state, A, 80.0, 80.0, later(first, 150));
        lift(&mut state, A, later(first, 150));
        assert_eq!(effect, Effect::Reset);
        assert_eq!(state.transform(), Transform::IDENTITY);

        let zoomed_again = later(start, 5_000);
        pinch(&mut state, 150.0, zoomed_again);
        assert_eq!(state.transform().translation, Vector::ZERO);

        let next_pan = later(start, 6_000);
        press(&mut state, A, 10.0, 10.0, next_pan);
        move_to(&mut state, A, 25.0, 5.0, next_pan);
        assert_eq!(state.transform().translation, Vector::new(15.0, -5.0));
    }

    #[test]
    fn slow_second_tap_is_not_a_double_tap() {
        let start = Instant::now();
        let mut state = State::default();
        pinch(&mut state, 200.0, start);

        let first = later(start, 1_000);
        press(&mut state, A, 50.0, 50.0, first);
        lift(&mut state, A, first);
        let effect = press(&mut state, A, 50.0, 50.0, later(first, 400));

        assert_eq!(effect, Effect::None);
        assert!(state.transform().is_zoomed());
    }

    #[test]
    fn dragging_cancels_pending_tap() {
        let start = Instant::now();
        let mut state = State::default();
        pinch(&mut state, 200.0, start);

        let first = later(start, 1_000);
        press(&mut state, A, 0.0, 0.0, first);
        move_to(&mut state, A, 60.0, 0.0, first);
        lift(&mut state, A, first);
        let effect = press(&mut state, A, 60.0, 0.0, later(first, 100));

        assert_eq!(effect, Effect::None);
        assert_eq!(state.transform().translation, Vector::new(60.0, 0.0));
    }

    #[test]
    fn reset_animates_only_once_painted() {
        let start = Instant::now();
        let mut unpainted = State::default();
        pinch(&mut unpainted, 200.0, start);
        pinch(&mut unpainted, 0.0, later(start, 1_000));
        assert!(!unpainted.is_animating());

        let mut painted = State::default();
        painted.handle_at(Message::Painted, start);
        pinch(&mut painted, 200.0, start);
        assert!(!painted.is_animating());

        let t = later(start, 1_000);
        pinch(&mut painted, 0.0, t);
        assert!(painted.is_animating());
        assert!(painted.rendered_transform(t).is_zoomed());

        assert!(painted.tick(later(t, 100)));
        assert!(!painted.tick(later(t, 300)));
        assert_eq!(painted.rendered_transform(later(t, 300)), Transform::IDENTITY);
    }

    #[test]
    fn set_source_resets_everything() {
        let start = Instant::now();
        let mut state = State::default();
        assert!(state.set_source(Path::new("images/page1.png")));
        state.handle_at(Message::Painted, start);
        pinch(&mut state, 200.0, start);

        assert!(!state.set_source(Path::new("images/page1.png")));
        assert!(state.transform().is_zoomed());

        assert!(state.set_source(Path::new("images/page2.png")));
        assert_eq!(state.transform(), Transform::IDENTITY);
        assert!(!state.is_painted());
        assert!(!state.is_animating());
        assert_eq!(state.source(), Some(Path::new("images/page2.png")));
    }

    #[test]
    fn cancel_gesture_keeps_transform() {
        let start = Instant::now();
        let mut state = State::default();
        pinch(&mut state, 200.0, start);

        let t = later(start, 1_000);
        press(&mut state, A, 0.0, 0.0, t);
        move_to(&mut state, A, 25.0, 0.0, t);
        state.cancel_gesture();

        assert_eq!(move_to(&mut state, A, 90.0, 0.0, t), Effect::None);
        assert_eq!(state.transform().translation, Vector::new(25.0, 0.0));
    }

    #[test]
    fn settings_follow_config() {
        let config = ZoomConfig {
            max_scale: Some(3.0),
            pinch_sensitivity: Some(0.02),
            transition_ms: Some(0),
        };
        let mut state = State::new(Settings::from_config(&config));
        state.handle_at(Message::Painted, Instant::now());
        pinch(&mut state, 150.0, Instant::now());
        assert_abs_diff_eq!(state.transform().scale, 2.0);

        pinch(&mut state, 1_000.0, Instant::now() + Duration::from_secs(1));
        assert_abs_diff_eq!(state.transform().scale, 3.0);

        pinch(&mut state, 0.0, Instant::now() + Duration::from_secs(2));
        assert!(!state.is_animating());
    }
}
