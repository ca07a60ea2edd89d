// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that renders the current screen
//! based on application state.

use super::startup::StartupReport;
use super::{Message, Screen};
use crate::i18n::fluent::I18n;
use crate::ui::components::error_display::{centered_error_view, ErrorDisplay};
use crate::ui::gallery;
use crate::ui::theming::AppTheme;
use iced::{
    widget::{Container, Text},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub theme: &'a AppTheme,
    pub screen: Screen,
    pub gallery: Option<&'a gallery::State>,
    pub startup: Option<&'a StartupReport>,
    pub show_error_details: bool,
    /// Recent diagnostic lines for the load-failure banner.
    pub banner_history: Vec<String>,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match (ctx.screen, ctx.gallery, ctx.startup) {
        (Screen::Gallery, Some(state), _) => gallery::view(
            state,
            gallery::ViewEnv {
                i18n: ctx.i18n,
                theme: ctx.theme,
            },
            ctx.banner_history,
        )
        .map(Message::Gallery),
        (Screen::StartupError, _, Some(report)) => {
            view_startup_error(report, ctx.i18n, ctx.theme, ctx.show_error_details)
        }
        _ => Container::new(Text::new(ctx.i18n.tr("startup-error-title"))).into(),
    };

    Container::new(current_view)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_startup_error<'a>(
    report: &StartupReport,
    i18n: &I18n,
    theme: &AppTheme,
    show_details: bool,
) -> Element<'a, Message> {
    let display = report.detail_lines(i18n).into_iter().fold(
        ErrorDisplay::new()
            .accent(theme.colors.error)
            .title(i18n.tr("startup-error-title"))
            .message(i18n.tr(report.error.i18n_key()))
            .details_visible(show_details)
            .on_toggle_details(Message::ToggleErrorDetails)
            .details_labels(
                i18n.tr("startup-error-details-show"),
                i18n.tr("startup-error-details-hide"),
                i18n.tr("startup-error-details-heading"),
            ),
        |display, line| display.details(line),
    );

    centered_error_view(display)
}
