// SPDX-License-Identifier: MPL-2.0
//! Reusable error display component with consistent styling.
//!
//! This component displays blocking errors with:
//! - A title in the error accent color
//! - A message explaining what went wrong
//! - Optional collapsible diagnostic details
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::components::error_display::ErrorDisplay;
//!
//! ErrorDisplay::new()
//!     .title("The gallery could not start")
//!     .message("The page images could not be found.")
//!     .details("Asset directory: images")
//!     .view()
//! ```

use crate::ui::design_tokens::{palette, radius, spacing, typography};
use iced::widget::{button, container, rule, text, Column, Container, Text};
use iced::{alignment, Color, Element, Length, Theme};

#[derive(Debug, Clone)]
pub struct ErrorDisplay<Message> {
    accent: Color,
    title: Option<String>,
    message: Option<String>,
    details: Vec<String>,
    show_details: bool,
    toggle_details_message: Option<Message>,
    show_details_label: String,
    hide_details_label: String,
    details_heading_label: String,
}

impl<Message> Default for ErrorDisplay<Message> {
    fn default() -> Self {
        Self {
            accent: palette::ERROR_500,
            title: None,
            message: None,
            details: Vec::new(),
            show_details: true,
            toggle_details_message: None,
            show_details_label: "Show details".to_string(),
            hide_details_label: "Hide details".to_string(),
            details_heading_label: "Details".to_string(),
        }
    }
}

impl<Message: Clone + 'static> ErrorDisplay<Message> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the accent used for the title and border.
    #[must_use]
    pub fn accent(mut self, color: Color) -> Self {
        self.accent = color;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Appends one line of diagnostic details.
    #[must_use]
    pub fn details(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    #[must_use]
    pub fn details_visible(mut self, visible: bool) -> Self {
        self.show_details = visible;
        self
    }

    /// Sets the message to emit when toggling details visibility.
    #[must_use]
    pub fn on_toggle_details(mut self, message: Message) -> Self {
        self.toggle_details_message = Some(message);
        self
    }

    /// Sets the localized labels for the details toggle.
    #[must_use]
    pub fn details_labels(
        mut self,
        show_label: impl Into<String>,
        hide_label: impl Into<String>,
        heading_label: impl Into<String>,
    ) -> Self {
        self.show_details_label = show_label.into();
        self.hide_details_label = hide_label.into();
        self.details_heading_label = heading_label.into();
        self
    }

    pub fn view(self) -> Element<'static, Message> {
        let accent_color = self.accent;

        let mut content = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .width(Length::Fill);

        if let Some(title_text) = self.title {
            let title = Text::new(title_text)
                .size(typography::TITLE_MD)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(accent_color),
                });
            content = content.push(title);
        }

        if let Some(message_text) = self.message {
            content = content.push(
                Container::new(Text::new(message_text).size(typography::BODY))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            );
        }

        if !self.details.is_empty() {
            if let Some(toggle_msg) = self.toggle_details_message {
                let toggle_label = if self.show_details {
                    self.hide_details_label
                } else {
                    self.show_details_label
                };
                let toggle_btn =
                    button(Text::new(toggle_label).size(typography::BODY_SM)).on_press(toggle_msg);
                content = content.push(
                    Container::new(toggle_btn)
                        .padding(spacing::XS)
                        .align_x(alignment::Horizontal::Center),
                );
            }

            if self.show_details {
                let secondary = |theme: &Theme| text::Style {
                    color: Some(theme.extended_palette().secondary.base.text),
                };

                let mut details_column = Column::new()
                    .spacing(spacing::XS)
                    .width(Length::Fill)
                    .push(rule::horizontal(1))
                    .push(
                        Text::new(self.details_heading_label)
                            .size(typography::BODY)
                            .style(secondary),
                    );
                for line in self.details {
                    details_column =
                        details_column.push(Text::new(line).size(typography::CAPTION).style(secondary));
                }

                content = content.push(
                    Container::new(details_column)
                        .width(Length::Fill)
                        .padding(spacing::SM),
                );
            }
        }

        Container::new(content)
            .width(Length::Fill)
            .max_width(500.0)
            .padding(spacing::LG)
            .style(move |theme: &Theme| {
                let bg_color = theme.extended_palette().background.weak.color;
                container::Style {
                    background: Some(iced::Background::Color(bg_color)),
                    border: iced::Border {
                        color: accent_color,
                        width: 1.0,
                        radius: radius::MD.into(),
                    },
                    text_color: Some(theme.palette().text),
                    ..Default::default()
                }
            })
            .into()
    }
}

/// Creates a centered error display that fills its container.
pub fn centered_error_view<Message: Clone + 'static>(
    error_display: ErrorDisplay<Message>,
) -> Element<'static, Message> {
    Container::new(error_display.view())
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG)
        .into()
}
