// SPDX-License-Identifier: MPL-2.0
//! Pagination and lazy-loading state for the slide track.
//!
//! The tracker never looks at widgets. It is fed the track geometry after
//! every scroll and decides which slide is current and which slides must be
//! loaded. `current_index` only caches the last slide that crossed the
//! visibility threshold, so it can lag the real scroll position between
//! observations.

use crate::config::{DEFAULT_PRELOAD_AHEAD, DEFAULT_PRELOAD_BEHIND, VISIBILITY_THRESHOLD};
use std::collections::BTreeSet;

/// Offsets closer than this to a slide boundary count as aligned (px).
const ALIGNMENT_TOLERANCE: f32 = 0.5;

/// Navigation direction along the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Horizontal geometry of the track at one scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    /// Scroll offset of the track's left edge (px).
    pub offset_x: f32,
    /// Visible width of the track (px).
    pub viewport_width: f32,
    /// Width of a single slide (px).
    pub slide_width: f32,
}

impl TrackGeometry {
    /// Fraction of slide `index` inside the viewport, in `[0, 1]`.
    #[must_use]
    pub fn visible_ratio(&self, index: usize) -> f32 {
        if self.slide_width <= 0.0 || self.viewport_width <= 0.0 {
            return 0.0;
        }

        #[allow(clippy::cast_precision_loss)]
        let left = index as f32 * self.slide_width;
        let right = left + self.slide_width;
        let visible_left = left.max(self.offset_x);
        let visible_right = right.min(self.offset_x + self.viewport_width);
        let overlap = (visible_right - visible_left).max(0.0);

        (overlap / self.slide_width).clamp(0.0, 1.0)
    }

    /// Scroll offset that puts slide `index` exactly in view.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let index = index as f32;
        index * self.slide_width
    }

    /// Slide closest to the current offset, clamped to `count`.
    #[must_use]
    pub fn nearest_slide(&self, count: usize) -> usize {
        if count == 0 || self.slide_width <= 0.0 {
            return 0;
        }
        let position = (self.offset_x / self.slide_width).round().max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = position as usize;
        index.min(count - 1)
    }

    /// Whether the offset sits on a slide boundary.
    #[must_use]
    pub fn is_aligned(&self, count: usize) -> bool {
        let target = self.offset_for(self.nearest_slide(count));
        (self.offset_x - target).abs() < ALIGNMENT_TOLERANCE
    }
}

/// Slides loaded around the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadWindow {
    pub behind: usize,
    pub ahead: usize,
}

impl Default for PreloadWindow {
    fn default() -> Self {
        Self {
            behind: DEFAULT_PRELOAD_BEHIND,
            ahead: DEFAULT_PRELOAD_AHEAD,
        }
    }
}

impl PreloadWindow {
    /// Valid indices of the window centered on `center` for a track of `total` slides.
    pub fn indices(self, center: usize, total: usize) -> impl Iterator<Item = usize> {
        let start = center.saturating_sub(self.behind);
        let end = center.saturating_add(self.ahead).min(total.saturating_sub(1));
        (start..=end).filter(move |_| total > 0)
    }
}

/// Result of feeding one scroll position to the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    /// Slides that crossed the visibility threshold, ascending.
    pub crossed: Vec<usize>,
    /// Slides added to the loaded set, ascending.
    pub newly_loaded: Vec<usize>,
}

impl Observation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crossed.is_empty() && self.newly_loaded.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SlideTracker {
    total: usize,
    current_index: usize,
    loaded: BTreeSet<usize>,
    window: PreloadWindow,
    /// Slides at or above the visibility threshold at the last observation.
    above_threshold: BTreeSet<usize>,
}

impl SlideTracker {
    /// Creates a tracker for `total` slides; slide 0 starts loaded.
    #[must_use]
    pub fn new(total: usize, window: PreloadWindow) -> Self {
        let mut loaded = BTreeSet::new();
        if total > 0 {
            loaded.insert(0);
        }
        Self {
            total,
            current_index: 0,
            loaded,
            window,
            above_threshold: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.contains(&index)
    }

    pub fn loaded(&self) -> impl Iterator<Item = usize> + '_ {
        self.loaded.iter().copied()
    }

    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Marks `index` current and loads its preload window.
    ///
    /// Returns the indices that were not loaded before. Out-of-range indices
    /// are ignored.
    pub fn report_current(&mut self, index: usize) -> Vec<usize> {
        if index >= self.total {
            return Vec::new();
        }
        self.current_index = index;

        let mut newly_loaded = Vec::new();
        for candidate in self.window.indices(index, self.total) {
            if self.loaded.insert(candidate) {
                newly_loaded.push(candidate);
            }
        }
        newly_loaded
    }

    /// Feeds one scroll position.
    ///
    /// Every watched slide whose visible ratio newly reaches the threshold is
    /// reported current, in ascending order, so the last one wins.
    pub fn observe_viewport(
        &mut self,
        geometry: TrackGeometry,
        is_watched: impl Fn(usize) -> bool,
    ) -> Observation {
        let mut observation = Observation::default();
        let mut now_above = BTreeSet::new();

        for index in 0..self.total {
            if !is_watched(index) {
                continue;
            }
            if geometry.visible_ratio(index) >= VISIBILITY_THRESHOLD {
                now_above.insert(index);
            }
        }

        for &index in now_above.difference(&self.above_threshold) {
            observation.crossed.push(index);
        }
        self.above_threshold = now_above;

        for index in observation.crossed.clone() {
            observation.newly_loaded.extend(self.report_current(index));
        }
        observation.newly_loaded.sort_unstable();
        observation
    }

    /// Neighbour of the current slide in `direction`, if any.
    #[must_use]
    pub fn target(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Previous => self.current_index.checked_sub(1),
            Direction::Next => {
                let next = self.current_index + 1;
                (next < self.total).then_some(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: usize = 24;

    fn geometry_at(offset_x: f32) -> TrackGeometry {
        TrackGeometry {
            offset_x,
            viewport_width: 800.0,
            slide_width: 800.0,
        }
    }

    fn all_watched(_: usize) -> bool {
        true
    }

    #[test]
    fn first_slide_is_loaded_from_construction() {
        let tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        assert!(tracker.is_loaded(0));
        assert_eq!(tracker.loaded_count(), 1);
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn empty_tracker_loads_nothing() {
        let mut tracker = SlideTracker::new(0, PreloadWindow::default());
        assert_eq!(tracker.loaded_count(), 0);
        assert!(tracker.report_current(0).is_empty());
        assert!(tracker.target(Direction::Next).is_none());
    }

    #[test]
    fn report_current_loads_preload_window() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        let newly = tracker.report_current(5);
        assert_eq!(newly, vec![4, 5, 6, 7]);
        for index in [4, 5, 6, 7] {
            assert!(tracker.is_loaded(index));
        }
        assert_eq!(tracker.current_index(), 5);
    }

    #[test]
    fn preload_window_is_clipped_at_both_ends() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        assert_eq!(tracker.report_current(0), vec![1, 2]);
        assert_eq!(tracker.report_current(23), vec![22, 23]);
    }

    #[test]
    fn repeated_reports_are_idempotent() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        tracker.report_current(3);
        let before = tracker.loaded_count();
        assert!(tracker.report_current(3).is_empty());
        assert_eq!(tracker.loaded_count(), before);
    }

    #[test]
    fn loaded_set_never_shrinks() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        let mut previous = tracker.loaded_count();
        for index in [10, 2, 17, 0, 23, 9] {
            tracker.report_current(index);
            assert!(tracker.loaded_count() >= previous);
            assert!(tracker.is_loaded(0));
            previous = tracker.loaded_count();
        }
    }

    #[test]
    fn loaded_is_superset_of_window_after_each_report() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        for i in 0..TOTAL {
            tracker.report_current(i);
            let expected = [i.checked_sub(1), Some(i), Some(i + 1), Some(i + 2)];
            for index in expected.into_iter().flatten().filter(|&j| j < TOTAL) {
                assert!(tracker.is_loaded(index), "slide {index} after {i}");
            }
        }
    }

    #[test]
    fn out_of_range_report_is_ignored() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        assert!(tracker.report_current(TOTAL).is_empty());
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn initial_observation_makes_first_slide_current() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        let observation = tracker.observe_viewport(geometry_at(0.0), all_watched);
        assert_eq!(observation.crossed, vec![0]);
        assert_eq!(observation.newly_loaded, vec![1, 2]);
    }

    #[test]
    fn slide_becomes_current_once_half_visible() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        tracker.observe_viewport(geometry_at(0.0), all_watched);

        let observation = tracker.observe_viewport(geometry_at(300.0), all_watched);
        assert!(observation.crossed.is_empty());
        assert_eq!(tracker.current_index(), 0);

        let observation = tracker.observe_viewport(geometry_at(450.0), all_watched);
        assert_eq!(observation.crossed, vec![1]);
        assert_eq!(tracker.current_index(), 1);
        assert_eq!(observation.newly_loaded, vec![3]);
    }

    #[test]
    fn staying_above_threshold_does_not_report_again() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        tracker.observe_viewport(geometry_at(800.0), all_watched);
        let observation = tracker.observe_viewport(geometry_at(820.0), all_watched);
        assert!(observation.is_empty());
    }

    #[test]
    fn scrolling_back_reports_previous_slide() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        tracker.observe_viewport(geometry_at(1600.0), all_watched);
        assert_eq!(tracker.current_index(), 2);

        let observation = tracker.observe_viewport(geometry_at(900.0), all_watched);
        assert_eq!(observation.crossed, vec![1]);
        assert_eq!(tracker.current_index(), 1);
    }

    #[test]
    fn unwatched_slides_are_not_reported() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        let observation = tracker.observe_viewport(geometry_at(800.0), |index| index != 1);
        assert!(observation.crossed.is_empty());
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn navigation_targets_stop_at_edges() {
        let mut tracker = SlideTracker::new(TOTAL, PreloadWindow::default());
        assert_eq!(tracker.target(Direction::Previous), None);
        assert_eq!(tracker.target(Direction::Next), Some(1));

        tracker.report_current(TOTAL - 1);
        assert_eq!(tracker.target(Direction::Next), None);
        assert_eq!(tracker.target(Direction::Previous), Some(TOTAL - 2));
    }

    #[test]
    fn visible_ratio_handles_partial_overlap() {
        let geometry = geometry_at(200.0);
        assert!((geometry.visible_ratio(0) - 0.75).abs() < f32::EPSILON);
        assert!((geometry.visible_ratio(1) - 0.25).abs() < f32::EPSILON);
        assert_eq!(geometry.visible_ratio(5), 0.0);
    }

    #[test]
    fn visible_ratio_is_zero_for_degenerate_geometry() {
        let geometry = TrackGeometry {
            offset_x: 0.0,
            viewport_width: 0.0,
            slide_width: 0.0,
        };
        assert_eq!(geometry.visible_ratio(0), 0.0);
        assert_eq!(geometry.nearest_slide(TOTAL), 0);
    }

    #[test]
    fn nearest_slide_rounds_and_clamps() {
        assert_eq!(geometry_at(390.0).nearest_slide(TOTAL), 0);
        assert_eq!(geometry_at(410.0).nearest_slide(TOTAL), 1);
        assert_eq!(geometry_at(1e7).nearest_slide(TOTAL), TOTAL - 1);
        assert_eq!(geometry_at(-50.0).nearest_slide(TOTAL), 0);
    }

    #[test]
    fn alignment_detects_slide_boundaries() {
        assert!(geometry_at(1600.0).is_aligned(TOTAL));
        assert!(!geometry_at(1650.0).is_aligned(TOTAL));
        assert_eq!(geometry_at(0.0).offset_for(3), 2400.0);
    }

    #[test]
    fn custom_window_is_respected() {
        let mut tracker = SlideTracker::new(
            TOTAL,
            PreloadWindow {
                behind: 0,
                ahead: 0,
            },
        );
        assert_eq!(tracker.report_current(4), vec![4]);
    }
}
