// SPDX-License-Identifier: MPL-2.0
//! Per-slide load status and zoom state.

use crate::media::ImageData;
use crate::ui::zoomable;

#[derive(Debug, Clone)]
pub enum SlideStatus {
    /// Outside the loaded set; renders a skeleton.
    Placeholder,
    /// In the loaded set, decode in flight; renders a skeleton with a spinner.
    Loading,
    Ready(ImageData),
    /// Decode failed on both the primary and fallback paths.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub status: SlideStatus,
    pub zoom: zoomable::State,
}

impl Slide {
    #[must_use]
    pub fn new(settings: zoomable::Settings) -> Self {
        Self {
            status: SlideStatus::Placeholder,
            zoom: zoomable::State::new(settings),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.status, SlideStatus::Loading)
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageData> {
        match &self.status {
            SlideStatus::Ready(image) => Some(image),
            _ => None,
        }
    }
}
