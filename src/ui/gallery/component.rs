// SPDX-License-Identifier: MPL-2.0
//! Slide track component: pagination, lazy loading, scrolling and per-page zoom.

use crate::config::{Config, ANIMATION_TICK_MS, SCROLL_ANIMATION_MS, SNAP_IDLE_MS};
use crate::error::Error;
use crate::gallery::{Catalog, Direction, PreloadWindow, SlideTracker, SlideWatcher, TrackGeometry};
use crate::media::{self, LoadedPage};
use crate::ui::gallery::scroll::{IdleTimer, ScrollAnimation};
use crate::ui::gallery::slide::{Slide, SlideStatus};
use crate::ui::zoomable;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{operation, Id};
use iced::{Size, Subscription, Task};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// Identifier used for the track scrollable widget.
pub const TRACK_ID: &str = "gallery-track";

const SCROLL_ANIMATION: Duration = Duration::from_millis(SCROLL_ANIMATION_MS);
const SNAP_IDLE: Duration = Duration::from_millis(SNAP_IDLE_MS);

/// Offsets closer than this to the target need no animation (px).
const SCROLL_EPSILON: f32 = 0.5;

/// Track tunables taken from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub preload: PreloadWindow,
    pub zoom: zoomable::Settings,
    pub touch_capable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Settings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            preload: PreloadWindow {
                behind: config.gallery.preload_behind(),
                ahead: config.gallery.preload_ahead(),
            },
            zoom: zoomable::Settings::from_config(&config.zoom),
            touch_capable: config.input.touch_capable.unwrap_or(false),
        }
    }
}

/// Last page that failed to load, shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// The track scrolled, by the user or by an animation step.
    Scrolled { offset_x: f32, viewport: Size },
    Resized(Size),
    Navigate(Direction),
    PageLoaded {
        index: usize,
        result: Result<LoadedPage, Error>,
    },
    Zoom {
        index: usize,
        message: zoomable::Message,
    },
    Tick(Instant),
    /// A finger touched the window, captured or not.
    FingerPressed(u64),
    /// A finger was lifted or lost.
    FingerReleased(u64),
    DismissError,
}

/// Side effects the application records after a track message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    CurrentChanged { index: usize },
    PageLoaded { index: usize, from_fallback: bool },
    PageFailed { index: usize, message: String },
    Navigated { direction: Direction, index: usize },
    Snapped { index: usize },
    ZoomReset { index: usize },
    TouchDetected,
}

pub struct State {
    catalog: Catalog,
    tracker: SlideTracker,
    /// Registered once in [`State::new`]; the filter only matters to
    /// callers of [`SlideTracker::observe_viewport`] with partial registration.
    watcher: SlideWatcher,
    slides: Vec<Slide>,
    viewport: Size,
    offset_x: f32,
    scroll: Option<ScrollAnimation>,
    idle: IdleTimer,
    load_error: Option<LoadFailure>,
    touch_capable: bool,
    /// Fingers currently on the window. Snapping waits until none remain.
    fingers: BTreeSet<u64>,
    /// Clock of the last tick, used to sample animations while drawing.
    now: Instant,
    started_at: Instant,
}

impl State {
    /// Builds the track and starts decoding the initial preload window.
    #[must_use]
    pub fn new(catalog: Catalog, settings: Settings) -> (Self, Task<Message>) {
        let mut tracker = SlideTracker::new(catalog.len(), settings.preload);
        // Every cell exists from the first frame whatever its load state, so a
        // single registration covers the whole track and is never redone.
        let mut watcher = SlideWatcher::new();
        watcher.watch_all(catalog.ids());
        tracker.report_current(0);

        let slides = (0..catalog.len())
            .map(|_| Slide::new(settings.zoom))
            .collect();

        let now = Instant::now();
        let mut state = Self {
            catalog,
            tracker,
            watcher,
            slides,
            viewport: Size::ZERO,
            offset_x: 0.0,
            scroll: None,
            idle: IdleTimer::default(),
            load_error: None,
            touch_capable: settings.touch_capable,
            fingers: BTreeSet::new(),
            now,
            started_at: now,
        };

        let initial: Vec<usize> = state.tracker.loaded().collect();
        let task = state.start_loads(&initial);
        (state, task)
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Scrolled { offset_x, viewport } => {
                self.offset_x = offset_x;
                self.viewport = viewport;
                if self.scroll.is_none() {
                    self.idle.touch(Instant::now());
                }
                self.observe_viewport()
            }
            Message::Resized(size) => (Effect::None, self.resize(size)),
            Message::Navigate(direction) => (self.navigate(direction, Instant::now()), Task::none()),
            Message::PageLoaded { index, result } => (self.apply_load(index, result), Task::none()),
            Message::Zoom { index, message } => {
                let Some(slide) = self.slides.get_mut(index) else {
                    return (Effect::None, Task::none());
                };
                match slide.zoom.handle(message) {
                    zoomable::Effect::Reset => (Effect::ZoomReset { index }, Task::none()),
                    zoomable::Effect::None | zoomable::Effect::TransformChanged => {
                        (Effect::None, Task::none())
                    }
                }
            }
            Message::Tick(now) => self.tick(now),
            Message::FingerPressed(finger) => {
                self.fingers.insert(finger);
                if self.touch_capable {
                    (Effect::None, Task::none())
                } else {
                    self.touch_capable = true;
                    (Effect::TouchDetected, Task::none())
                }
            }
            Message::FingerReleased(finger) => {
                let was_down = self.fingers.remove(&finger);
                if was_down && self.fingers.is_empty() && self.scroll.is_none() {
                    self.idle.touch(Instant::now());
                }
                (Effect::None, Task::none())
            }
            Message::DismissError => {
                self.load_error = None;
                (Effect::None, Task::none())
            }
        }
    }

    /// Tick subscription, active only while something animates or waits.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.needs_tick() {
            iced::time::every(Duration::from_millis(ANIMATION_TICK_MS)).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.scroll.is_some()
            || self.idle.is_pending()
            || self
                .slides
                .iter()
                .any(|slide| slide.is_loading() || slide.zoom.is_animating())
    }

    fn geometry(&self) -> TrackGeometry {
        TrackGeometry {
            offset_x: self.offset_x,
            viewport_width: self.viewport.width,
            slide_width: self.viewport.width,
        }
    }

    /// Feeds the current scroll position to the tracker and loads what it asks for.
    fn observe_viewport(&mut self) -> (Effect, Task<Message>) {
        let previous = self.tracker.current_index();
        let geometry = self.geometry();

        let catalog = &self.catalog;
        let watcher = &self.watcher;
        let observation = self.tracker.observe_viewport(geometry, |index| {
            catalog
                .get(index)
                .is_some_and(|descriptor| watcher.is_watched(descriptor.id))
        });

        let task = self.start_loads(&observation.newly_loaded);

        let current = self.tracker.current_index();
        if current == previous {
            return (Effect::None, task);
        }

        self.load_error = None;
        if let Some(slide) = self.slides.get_mut(previous) {
            slide.zoom.cancel_gesture();
        }
        (Effect::CurrentChanged { index: current }, task)
    }

    fn start_loads(&mut self, indices: &[usize]) -> Task<Message> {
        let mut tasks = Vec::with_capacity(indices.len());

        for &index in indices {
            let (Some(slide), Some(descriptor)) =
                (self.slides.get_mut(index), self.catalog.get(index))
            else {
                continue;
            };
            if !matches!(slide.status, SlideStatus::Placeholder) {
                continue;
            }
            slide.status = SlideStatus::Loading;

            let primary = descriptor.source.clone();
            let fallback = descriptor.fallback_source.clone();
            tasks.push(Task::perform(
                media::load_page(primary, fallback),
                move |result| Message::PageLoaded { index, result },
            ));
        }

        Task::batch(tasks)
    }

    fn apply_load(&mut self, index: usize, result: Result<LoadedPage, Error>) -> Effect {
        let Some(slide) = self.slides.get_mut(index) else {
            return Effect::None;
        };
        // Late or duplicate results are dropped.
        if !slide.is_loading() {
            return Effect::None;
        }

        match result {
            Ok(page) => {
                slide.zoom.set_source(&page.path);
                slide.status = SlideStatus::Ready(page.image);
                Effect::PageLoaded {
                    index,
                    from_fallback: page.from_fallback,
                }
            }
            Err(error) => {
                let message = error.to_string();
                slide.status = SlideStatus::Failed(message.clone());
                self.load_error = Some(LoadFailure {
                    index,
                    message: message.clone(),
                });
                Effect::PageFailed { index, message }
            }
        }
    }

    fn navigate(&mut self, direction: Direction, now: Instant) -> Effect {
        let Some(index) = self.tracker.target(direction) else {
            return Effect::None;
        };
        self.animate_to(index, now);
        Effect::Navigated { direction, index }
    }

    fn animate_to(&mut self, index: usize, now: Instant) {
        let target = self.geometry().offset_for(index);
        self.idle.cancel();
        self.scroll = ((target - self.offset_x).abs() >= SCROLL_EPSILON)
            .then(|| ScrollAnimation::new(self.offset_x, target, now, SCROLL_ANIMATION));
    }

    /// Follows a new viewport size and re-aligns on the current slide.
    fn resize(&mut self, size: Size) -> Task<Message> {
        if size == self.viewport {
            return Task::none();
        }
        self.viewport = size;
        self.scroll = None;
        self.idle.cancel();
        self.offset_x = self.geometry().offset_for(self.tracker.current_index());
        scroll_track_to(self.offset_x)
    }

    fn tick(&mut self, now: Instant) -> (Effect, Task<Message>) {
        self.now = now;
        let mut effect = Effect::None;
        let mut task = Task::none();

        if let Some(animation) = self.scroll {
            let offset = animation.sample(now);
            if animation.is_finished(now) {
                self.scroll = None;
            }
            self.offset_x = offset;
            task = scroll_track_to(offset);
        } else if self.fingers.is_empty() && self.idle.fire(now, SNAP_IDLE) {
            let count = self.catalog.len();
            let geometry = self.geometry();
            if count > 0 && !geometry.is_aligned(count) {
                let index = geometry.nearest_slide(count);
                self.animate_to(index, now);
                effect = Effect::Snapped { index };
            }
        }

        for slide in &mut self.slides {
            slide.zoom.tick(now);
        }

        (effect, task)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn tracker(&self) -> &SlideTracker {
        &self.tracker
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.tracker.current_index()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.tracker.total()
    }

    /// Whether a touch event has been seen or the config declares touch input.
    #[must_use]
    pub fn touch_capable(&self) -> bool {
        self.touch_capable
    }

    /// Whether any finger is still on the window.
    #[must_use]
    pub fn is_touching(&self) -> bool {
        !self.fingers.is_empty()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&LoadFailure> {
        self.load_error.as_ref()
    }

    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_some()
    }

    #[must_use]
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Time since the track was built, as of the last tick. Drives the loading spinner.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now.saturating_duration_since(self.started_at)
    }
}

fn scroll_track_to(offset_x: f32) -> Task<Message> {
    operation::scroll_to(
        Id::new(TRACK_ID),
        AbsoluteOffset {
            x: offset_x,
            y: 0.0,
        },
    )
}
