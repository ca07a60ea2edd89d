// SPDX-License-Identifier: MPL-2.0
//! Rendering of the slide track with its counter and error banner overlays.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, shadow, sizing, spacing, typography};
use crate::ui::gallery::component::{LoadFailure, Message, State, TRACK_ID};
use crate::ui::gallery::slide::{Slide, SlideStatus};
use crate::ui::theming::AppTheme;
use crate::ui::widgets::animated_spinner::{rotation_for, AnimatedSpinner};
use crate::ui::widgets::TransformedImage;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, container, responsive, scrollable, stack, text, Column, Container, Id, Row,
};
use iced::{alignment, Background, Border, Color, Element, Length, Size, Theme};

/// Borrowed context shared by every view function.
#[derive(Clone, Copy)]
pub struct ViewEnv<'a> {
    pub i18n: &'a I18n,
    pub theme: &'a AppTheme,
}

/// Renders the track. `history` lines are listed in the error banner.
pub fn view<'a>(
    state: &'a State,
    env: ViewEnv<'a>,
    history: Vec<String>,
) -> Element<'a, Message> {
    let track = responsive(move |size| track(state, env, size));

    let mut layers = stack![track, counter(state, env)]
        .width(Length::Fill)
        .height(Length::Fill);

    if let Some(failure) = state.load_error() {
        layers = layers.push(error_banner(state, failure, history, env));
    }

    let background = env.theme.colors.surface_primary;
    Container::new(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(background)),
            ..Default::default()
        })
        .into()
}

/// Horizontal scrollable holding one viewport-sized cell per page.
fn track<'a>(state: &'a State, env: ViewEnv<'a>, size: Size) -> Element<'a, Message> {
    let cells = state
        .slides()
        .iter()
        .enumerate()
        .map(|(index, slide)| slide_cell(state, index, slide, env, size));

    scrollable(Row::with_children(cells).height(Length::Fixed(size.height)))
        .id(Id::new(TRACK_ID))
        .direction(Direction::Horizontal(Scrollbar::new().width(0).scroller_width(0)))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport| Message::Scrolled {
            offset_x: viewport.absolute_offset().x,
            viewport: viewport.bounds().size(),
        })
        .into()
}

fn slide_cell<'a>(
    state: &'a State,
    index: usize,
    slide: &'a Slide,
    env: ViewEnv<'a>,
    size: Size,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match &slide.status {
        SlideStatus::Ready(image) => TransformedImage::new(
            image.handle.clone(),
            image.size(),
            move |message| Message::Zoom { index, message },
        )
        .transform(slide.zoom.rendered_transform(state.now()))
        .capturing(slide.zoom.is_capturing())
        .painted(slide.zoom.is_painted())
        .into(),
        SlideStatus::Loading => skeleton(
            Column::new()
                .spacing(spacing::SM)
                .align_x(alignment::Horizontal::Center)
                .push(
                    AnimatedSpinner::new(
                        env.theme.colors.text_secondary,
                        rotation_for(state.elapsed()),
                    )
                    .into_element(),
                )
                .push(
                    text(env.i18n.tr("gallery-slide-loading"))
                        .size(typography::BODY)
                        .color(env.theme.colors.text_secondary),
                )
                .into(),
            env,
        ),
        SlideStatus::Placeholder => {
            let title = state
                .catalog()
                .get(index)
                .map(|descriptor| descriptor.title.clone())
                .unwrap_or_default();
            skeleton(
                text(title)
                    .size(typography::TITLE_LG)
                    .color(env.theme.colors.text_secondary)
                    .into(),
                env,
            )
        }
        SlideStatus::Failed(_) => skeleton(
            text(env.i18n.tr("gallery-slide-unavailable"))
                .size(typography::BODY)
                .color(env.theme.colors.error)
                .into(),
            env,
        ),
    };

    Container::new(content)
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

/// Neutral tile standing in for a page that is not decoded.
fn skeleton<'a>(content: Element<'a, Message>, env: ViewEnv<'a>) -> Element<'a, Message> {
    let fill = env.theme.colors.surface_secondary;
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(fill)),
            ..Default::default()
        })
        .into()
}

/// "current / total" pill pinned to the bottom center.
fn counter<'a>(state: &'a State, env: ViewEnv<'a>) -> Element<'a, Message> {
    let label = env.i18n.tr_with_args(
        "gallery-counter",
        &[
            ("current", (state.current_index() + 1).to_string()),
            ("total", state.total().to_string()),
        ],
    );

    let colors = &env.theme.colors;
    let background = colors.overlay_background;
    let pill = Container::new(
        text(label)
            .size(typography::BODY_LG)
            .color(colors.overlay_text),
    )
    .padding([spacing::XXS, spacing::SM])
    .style(move |_theme: &Theme| container::Style {
        background: Some(Background::Color(background)),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    });

    Container::new(pill)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Bottom)
        .into()
}

/// Dismissable notice for the last page that failed to load.
fn error_banner<'a>(
    state: &'a State,
    failure: &'a LoadFailure,
    history: Vec<String>,
    env: ViewEnv<'a>,
) -> Element<'a, Message> {
    let title = state
        .catalog()
        .get(failure.index)
        .map(|descriptor| descriptor.title.clone())
        .unwrap_or_default();

    let colors = &env.theme.colors;
    let accent = colors.error;
    let background = colors.overlay_background;

    let muted = Color {
        a: 0.7,
        ..colors.overlay_text
    };
    let log = history.into_iter().fold(Column::new(), |column, line| {
        column.push(text(line).size(typography::CAPTION).color(muted))
    });

    let content = Column::new()
        .spacing(spacing::XS)
        .push(
            text(env.i18n.tr_with_args("error-banner-title", &[("title", title)]))
                .size(typography::BODY)
                .color(accent),
        )
        .push(
            text(env.i18n.tr("error-banner-hint"))
                .size(typography::BODY_SM)
                .color(colors.overlay_text),
        )
        .push(log)
        .push(
            button(text(env.i18n.tr("error-banner-dismiss")).size(typography::BODY_SM))
                .padding([spacing::XXS, spacing::SM])
                .on_press(Message::DismissError),
        );

    let banner = Container::new(content)
        .max_width(sizing::BANNER_MAX_WIDTH)
        .padding(spacing::SM)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(background)),
            border: Border {
                color: accent,
                width: 1.0,
                radius: radius::MD.into(),
            },
            shadow: shadow::MD,
            ..Default::default()
        });

    Container::new(banner)
        .width(Length::Fill)
        .padding(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Top)
        .into()
}
