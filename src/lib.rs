// SPDX-License-Identifier: MPL-2.0
//! `page_gallery` is a horizontally paginated image gallery built with the Iced GUI framework.
//!
//! Pages are laid out one per viewport in a scrollable track, decoded lazily
//! around the visible page, and can be panned and pinch-zoomed individually.
//! User-facing text is localized with Fluent.

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
