// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the gallery screen.
//!
//! The `App` struct wires together the page track, localization, theming and
//! diagnostics. It decides at launch whether the gallery can be mounted at all
//! and otherwise shows the startup error panel.

mod message;
pub mod paths;
mod screen;
pub mod startup;
mod subscription;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;
pub use startup::StartupReport;

use crate::config::{self, Config};
use crate::diagnostics::{AppStateEvent, DiagnosticsCollector, UserAction};
use crate::gallery::Direction;
use crate::i18n::fluent::I18n;
use crate::ui::gallery::{self, Effect};
use crate::ui::theming::AppTheme;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    theme: AppTheme,
    gallery: Option<gallery::State>,
    startup: Option<StartupReport>,
    show_error_details: bool,
    diagnostics: DiagnosticsCollector,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field(
                "current_page",
                &self.gallery.as_ref().map(gallery::State::current_index),
            )
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 320;
pub const MIN_WINDOW_WIDTH: u32 = 320;

/// Diagnostic lines listed under the startup error.
const STARTUP_HISTORY_LINES: usize = 8;
/// Diagnostic lines listed in the load-failure banner.
const BANNER_HISTORY_LINES: usize = 4;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    paths::init_cli_overrides(flags.config_dir.clone());

    // iced 0.14 requires a `Fn` boot closure; flags are cloned per call.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the configuration and mounts the gallery or the startup error panel.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        Self::with_config(flags, &config, config_warning)
    }

    /// Builds the application from an already loaded configuration.
    pub fn with_config(
        flags: Flags,
        config: &Config,
        config_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang.clone(), config);
        let mut diagnostics = DiagnosticsCollector::default();

        if let Some(key) = config_warning {
            diagnostics.log_warning(i18n.tr(&key));
        }

        let mut app = App {
            i18n,
            screen: Screen::Gallery,
            theme: AppTheme::new(config.general.theme_mode),
            gallery: None,
            startup: None,
            show_error_details: true,
            diagnostics,
        };

        match startup::prepare(&flags, config) {
            Ok(catalog) => {
                let pages = catalog.len();
                let (state, task) =
                    gallery::State::new(catalog, gallery::Settings::from_config(config));
                app.gallery = Some(state);
                app.diagnostics
                    .log_state(AppStateEvent::GalleryReady { pages });
                (app, task.map(Message::Gallery))
            }
            Err(mut report) => {
                app.diagnostics.log_error(report.error.to_string());
                report.history = app.diagnostics.problem_lines(STARTUP_HISTORY_LINES);
                app.screen = Screen::StartupError;
                app.startup = Some(report);
                (app, Task::none())
            }
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");

        let page_title = self.gallery.as_ref().and_then(|state| {
            state
                .catalog()
                .get(state.current_index())
                .map(|descriptor| descriptor.title.clone())
        });

        match page_title {
            Some(title) => format!("{title} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.screen);
        let tick_sub = subscription::create_tick_subscription(self.gallery.as_ref());

        Subscription::batch([event_sub, tick_sub])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Gallery(gallery_message) => {
                let Some(state) = self.gallery.as_mut() else {
                    return Task::none();
                };
                let (effect, task) = state.handle_message(gallery_message);
                self.record_effect(effect);
                task.map(Message::Gallery)
            }
            Message::ToggleErrorDetails => {
                self.show_error_details = !self.show_error_details;
                Task::none()
            }
        }
    }

    fn record_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None | Effect::CurrentChanged { .. } => {}
            Effect::PageLoaded {
                index,
                from_fallback,
            } => {
                if from_fallback {
                    self.diagnostics
                        .log_warning(format!("Page {} loaded from the fallback directory", index + 1));
                }
                self.diagnostics.log_state(AppStateEvent::PageLoaded {
                    index,
                    from_fallback,
                });
            }
            Effect::PageFailed { index, message } => {
                self.diagnostics
                    .log_error(format!("Page {} failed to load: {}", index + 1, message));
            }
            Effect::Navigated { direction, .. } => {
                self.diagnostics.log_action(match direction {
                    Direction::Previous => UserAction::NavigatePrevious,
                    Direction::Next => UserAction::NavigateNext,
                });
            }
            Effect::Snapped { index } => {
                self.diagnostics
                    .log_action(UserAction::SnapToPage { index });
            }
            Effect::ZoomReset { index } => {
                self.diagnostics
                    .log_action(UserAction::ResetZoom { index });
            }
            Effect::TouchDetected => {
                self.diagnostics.log_state(AppStateEvent::TouchDetected);
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            theme: &self.theme,
            screen: self.screen,
            gallery: self.gallery.as_ref(),
            startup: self.startup.as_ref(),
            show_error_details: self.show_error_details,
            banner_history: self.banner_history(),
        })
    }

    /// Recent activity shown with a load failure, empty while no banner is up.
    fn banner_history(&self) -> Vec<String> {
        let failing = self
            .gallery
            .as_ref()
            .is_some_and(|state| state.load_error().is_some());
        if failing {
            self.diagnostics.recent_lines(BANNER_HISTORY_LINES)
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn gallery(&self) -> Option<&gallery::State> {
        self.gallery.as_ref()
    }

    #[must_use]
    pub fn startup_report(&self) -> Option<&StartupReport> {
        self.startup.as_ref()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticEventKind;
    use crate::error::{Error, StartupError};
    use tempfile::tempdir;

    fn flags_for(dir: &std::path::Path, count: usize) -> Flags {
        Flags {
            lang: Some("en-US".to_string()),
            assets: Some(dir.display().to_string()),
            count: Some(count),
            config_dir: None,
        }
    }

    #[test]
    fn reachable_assets_mount_the_gallery() {
        let dir = tempdir().expect("failed to create temp dir");
        let (app, _) = App::with_config(flags_for(dir.path(), 24), &Config::default(), None);

        assert_eq!(app.screen(), Screen::Gallery);
        let state = app.gallery().expect("gallery should be mounted");
        assert_eq!(state.total(), 24);
        assert_eq!(app.title(), "Page 1 - Page Gallery");
        assert!(app
            .diagnostics()
            .iter()
            .any(|event| event.kind
                == DiagnosticEventKind::AppState {
                    state: AppStateEvent::GalleryReady { pages: 24 }
                }));
    }

    #[test]
    fn empty_catalog_shows_startup_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let (app, _) = App::with_config(flags_for(dir.path(), 0), &Config::default(), None);

        assert_eq!(app.screen(), Screen::StartupError);
        assert!(app.gallery().is_none());
        let report = app.startup_report().expect("report");
        assert_eq!(report.error, StartupError::EmptyCatalog);
        assert_eq!(app.diagnostics().problems().count(), 1);
        assert_eq!(report.history.len(), 1);
        assert!(report.history[0].contains("[ERROR]"));
    }

    #[test]
    fn config_warning_is_recorded() {
        let dir = tempdir().expect("failed to create temp dir");
        let (app, _) = App::with_config(
            flags_for(dir.path(), 3),
            &Config::default(),
            Some(config::CONFIG_LOAD_WARNING_KEY.to_string()),
        );
        assert!(app
            .diagnostics()
            .problems()
            .any(|event| matches!(event.kind, DiagnosticEventKind::Warning { .. })));
    }

    #[test]
    fn startup_history_includes_config_warning() {
        let dir = tempdir().expect("failed to create temp dir");
        let (app, _) = App::with_config(
            flags_for(dir.path(), 0),
            &Config::default(),
            Some(config::CONFIG_LOAD_WARNING_KEY.to_string()),
        );

        let report = app.startup_report().expect("report");
        assert_eq!(report.history.len(), 2);
        assert!(report.history[0].contains("[WARN]"));
        assert!(report.history[1].contains("[ERROR]"));
    }

    #[test]
    fn page_failures_are_logged_as_errors() {
        let dir = tempdir().expect("failed to create temp dir");
        let (mut app, _) = App::with_config(flags_for(dir.path(), 3), &Config::default(), None);

        let _ = app.update(Message::Gallery(gallery::Message::PageLoaded {
            index: 1,
            result: Err(Error::Io("missing".into())),
        }));

        assert!(app.diagnostics().problems().any(|event| matches!(
            &event.kind,
            DiagnosticEventKind::Error { message } if message.starts_with("Page 2")
        )));
        assert!(app.gallery().and_then(gallery::State::load_error).is_some());

        let history = app.banner_history();
        assert!(!history.is_empty());
        assert!(history.len() <= BANNER_HISTORY_LINES);
        assert!(history
            .last()
            .is_some_and(|line| line.contains("[ERROR] Page 2")));
    }

    #[test]
    fn banner_history_is_empty_without_failure() {
        let dir = tempdir().expect("failed to create temp dir");
        let (app, _) = App::with_config(flags_for(dir.path(), 3), &Config::default(), None);
        assert!(app.banner_history().is_empty());
    }

    #[test]
    fn toggling_details_flips_visibility() {
        let dir = tempdir().expect("failed to create temp dir");
        let (mut app, _) = App::with_config(flags_for(dir.path(), 0), &Config::default(), None);
        assert!(app.show_error_details);
        let _ = app.update(Message::ToggleErrorDetails);
        assert!(!app.show_error_details);
    }
}
