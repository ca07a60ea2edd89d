// SPDX-License-Identifier: MPL-2.0
//! Image widget that draws a page through a pan/zoom transform.
//!
//! The image is fitted inside the widget bounds (contain), then translated
//! and scaled about the bounds center and clipped to the bounds. Touch and
//! left-button input are forwarded as pointer messages; the widget never
//! mutates the transform itself.

use crate::ui::zoomable::{self, PointerId, Transform};
use iced::advanced::image::{self as advanced_image, Renderer as _};
use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer::{self, Renderer as _};
use iced::advanced::widget::{self, tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::widget::image;
use iced::{mouse, touch, window, Element, Event, Length, Rectangle, Size, Theme};
use std::collections::BTreeSet;

/// Per-widget input bookkeeping kept in the widget tree.
#[derive(Debug, Default)]
struct InputState {
    mouse_down: bool,
    fingers: BTreeSet<u64>,
    /// Handle whose first paint has already been reported.
    painted_handle: Option<advanced_image::Id>,
}

pub struct TransformedImage<'a, Message> {
    handle: image::Handle,
    image_size: Size,
    transform: Transform,
    capturing: bool,
    painted: bool,
    on_input: Box<dyn Fn(zoomable::Message) -> Message + 'a>,
}

impl<'a, Message> TransformedImage<'a, Message> {
    pub fn new(
        handle: image::Handle,
        image_size: Size,
        on_input: impl Fn(zoomable::Message) -> Message + 'a,
    ) -> Self {
        Self {
            handle,
            image_size,
            transform: Transform::IDENTITY,
            capturing: false,
            painted: false,
            on_input: Box::new(on_input),
        }
    }

    /// Transform to draw with this frame.
    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Whether pointer events should be kept from the enclosing track.
    #[must_use]
    pub fn capturing(mut self, capturing: bool) -> Self {
        self.capturing = capturing;
        self
    }

    /// Whether the page already reported its first paint.
    #[must_use]
    pub fn painted(mut self, painted: bool) -> Self {
        self.painted = painted;
        self
    }

    fn publish(&self, shell: &mut Shell<'_, Message>, msg: zoomable::Message) {
        shell.publish((self.on_input)(msg));
    }
}

/// Largest rectangle with the image's aspect ratio centered in `bounds`.
#[must_use]
pub fn contain(image_size: Size, bounds: Rectangle) -> Rectangle {
    if image_size.width <= 0.0 || image_size.height <= 0.0 {
        return Rectangle::new(bounds.center(), Size::ZERO);
    }

    let ratio = (bounds.width / image_size.width).min(bounds.height / image_size.height);
    let size = Size::new(image_size.width * ratio, image_size.height * ratio);
    Rectangle {
        x: bounds.x + (bounds.width - size.width) / 2.0,
        y: bounds.y + (bounds.height - size.height) / 2.0,
        width: size.width,
        height: size.height,
    }
}

impl<Message> Widget<Message, Theme, iced::Renderer> for TransformedImage<'_, Message> {
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<InputState>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(InputState::default())
    }

    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn layout(
        &mut self,
        _tree: &mut widget::Tree,
        _renderer: &iced::Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::atomic(limits, Length::Fill, Length::Fill)
    }

    fn draw(
        &self,
        _tree: &widget::Tree,
        renderer: &mut iced::Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let fitted = contain(self.image_size, bounds);
        let image_bounds = self.transform.apply(fitted, bounds.center());

        renderer.with_layer(bounds, |renderer| {
            let image = advanced_image::Image::<image::Handle> {
                handle: self.handle.clone(),
                filter_method: advanced_image::FilterMethod::Linear,
                rotation: iced::Radians(0.0),
                opacity: 1.0,
                snap: true,
                border_radius: iced::border::Radius::default(),
            };

            renderer.draw_image(image, image_bounds, bounds);
        });
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &iced::Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let state = tree.state.downcast_mut::<InputState>();

        match event {
            Event::Window(window::Event::RedrawRequested(_)) => {
                let id = self.handle.id();
                if !self.painted && state.painted_handle != Some(id) {
                    state.painted_handle = Some(id);
                    self.publish(shell, zoomable::Message::Painted);
                }
            }
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if bounds.contains(*position) {
                    state.fingers.insert(id.0);
                    self.publish(
                        shell,
                        zoomable::Message::PointerPressed {
                            id: PointerId::Finger(id.0),
                            position: *position,
                        },
                    );
                    if self.capturing || state.fingers.len() > 1 {
                        shell.capture_event();
                    }
                }
            }
            Event::Touch(touch::Event::FingerMoved { id, position }) => {
                if state.fingers.contains(&id.0) {
                    self.publish(
                        shell,
                        zoomable::Message::PointerMoved {
                            id: PointerId::Finger(id.0),
                            position: *position,
                        },
                    );
                    if self.capturing || state.fingers.len() > 1 {
                        shell.capture_event();
                    }
                }
            }
            Event::Touch(
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
            ) => {
                if state.fingers.remove(&id.0) {
                    self.publish(
                        shell,
                        zoomable::Message::PointerLifted {
                            id: PointerId::Finger(id.0),
                        },
                    );
                }
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_over(bounds) {
                    state.mouse_down = true;
                    self.publish(
                        shell,
                        zoomable::Message::PointerPressed {
                            id: PointerId::Mouse,
                            position,
                        },
                    );
                    if self.capturing {
                        shell.capture_event();
                    }
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.mouse_down {
                    self.publish(
                        shell,
                        zoomable::Message::PointerMoved {
                            id: PointerId::Mouse,
                            position: *position,
                        },
                    );
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.mouse_down {
                    state.mouse_down = false;
                    self.publish(
                        shell,
                        zoomable::Message::PointerLifted {
                            id: PointerId::Mouse,
                        },
                    );
                }
            }
            _ => {}
        }
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &iced::Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<InputState>();
        if !self.transform.is_zoomed() || !cursor.is_over(layout.bounds()) {
            return mouse::Interaction::default();
        }
        if state.mouse_down {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::Grab
        }
    }
}

impl<'a, Message: 'a> From<TransformedImage<'a, Message>> for Element<'a, Message> {
    fn from(widget: TransformedImage<'a, Message>) -> Self {
        Element::new(widget)
    }
}
