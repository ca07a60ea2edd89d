// SPDX-License-Identifier: MPL-2.0
//! Horizontal page track.
//!
//! The track lays out one viewport-sized cell per catalog entry inside a
//! horizontal scrollable. Only pages within the preload window around the
//! current page are decoded; the others render as skeleton tiles.
//!
//! - [`component`] - State, messages and effects of the track
//! - [`view`] - Rendering of the track and its overlays

pub mod component;
mod scroll;
mod slide;
pub mod view;

pub use component::{Effect, LoadFailure, Message, Settings, State, TRACK_ID};
pub use slide::{Slide, SlideStatus};
pub use view::{view, ViewEnv};
