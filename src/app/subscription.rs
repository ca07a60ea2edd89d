// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard, touch and window events are routed to the gallery only while
//! the gallery screen is shown; the startup error panel listens to nothing.

use super::{Message, Screen};
use crate::gallery::Direction;
use crate::ui::gallery;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, touch, window, Event, Subscription};

/// Creates the native event subscription for the current screen.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Gallery => event::listen_with(|event, status, _window_id| {
            route_gallery_event(&event, status).map(Message::Gallery)
        }),
        Screen::StartupError => Subscription::none(),
    }
}

/// Creates the animation tick subscription, active only while the track needs it.
pub fn create_tick_subscription(gallery: Option<&gallery::State>) -> Subscription<Message> {
    gallery.map_or_else(Subscription::none, |state| {
        state.subscription().map(Message::Gallery)
    })
}

/// Maps a native event to a track message.
///
/// Arrow keys already consumed by a focused widget are left alone. Finger
/// presses and releases are forwarded whatever their status so the track
/// knows when a swipe has ended.
fn route_gallery_event(event: &Event, status: event::Status) -> Option<gallery::Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            if status == event::Status::Captured {
                return None;
            }
            match key.as_ref() {
                Key::Named(Named::ArrowLeft) => {
                    Some(gallery::Message::Navigate(Direction::Previous))
                }
                Key::Named(Named::ArrowRight) => Some(gallery::Message::Navigate(Direction::Next)),
                _ => None,
            }
        }
        Event::Touch(touch::Event::FingerPressed { id, .. }) => {
            Some(gallery::Message::FingerPressed(id.0))
        }
        Event::Touch(
            touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
        ) => Some(gallery::Message::FingerReleased(id.0)),
        Event::Window(window::Event::Opened { size, .. } | window::Event::Resized(size)) => {
            Some(gallery::Message::Resized(*size))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::{key, Location, Modifiers};
    use iced::{Point, Size};

    fn key_press(named: Named) -> Event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(named),
            modified_key: Key::Named(named),
            physical_key: key::Physical::Unidentified(key::NativeCode::Unidentified),
            location: Location::Standard,
            modifiers: Modifiers::default(),
            text: None,
            repeat: false,
        })
    }

    #[test]
    fn arrow_keys_navigate() {
        assert!(matches!(
            route_gallery_event(&key_press(Named::ArrowLeft), event::Status::Ignored),
            Some(gallery::Message::Navigate(Direction::Previous))
        ));
        assert!(matches!(
            route_gallery_event(&key_press(Named::ArrowRight), event::Status::Ignored),
            Some(gallery::Message::Navigate(Direction::Next))
        ));
    }

    #[test]
    fn captured_and_unrelated_keys_are_ignored() {
        assert!(route_gallery_event(&key_press(Named::ArrowRight), event::Status::Captured).is_none());
        assert!(route_gallery_event(&key_press(Named::ArrowUp), event::Status::Ignored).is_none());
    }

    #[test]
    fn touch_is_detected_even_when_captured() {
        let event = Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(0),
            position: Point::ORIGIN,
        });
        assert!(matches!(
            route_gallery_event(&event, event::Status::Captured),
            Some(gallery::Message::FingerPressed(0))
        ));
    }

    #[test]
    fn lifted_and_lost_fingers_are_released() {
        let lifted = Event::Touch(touch::Event::FingerLifted {
            id: touch::Finger(3),
            position: Point::ORIGIN,
        });
        let lost = Event::Touch(touch::Event::FingerLost {
            id: touch::Finger(4),
            position: Point::ORIGIN,
        });
        assert!(matches!(
            route_gallery_event(&lifted, event::Status::Captured),
            Some(gallery::Message::FingerReleased(3))
        ));
        assert!(matches!(
            route_gallery_event(&lost, event::Status::Ignored),
            Some(gallery::Message::FingerReleased(4))
        ));
    }

    #[test]
    fn window_resize_is_forwarded() {
        let event = Event::Window(window::Event::Resized(Size::new(1024.0, 768.0)));
        assert!(matches!(
            route_gallery_event(&event, event::Status::Ignored),
            Some(gallery::Message::Resized(size)) if size == Size::new(1024.0, 768.0)
        ));
    }
}
