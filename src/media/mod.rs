// SPDX-License-Identifier: MPL-2.0
//! Page image handling.
//!
//! Pages are plain raster images decoded with the `image` crate into RGBA
//! handles the renderer can upload directly.

pub mod image;

pub use image::{load_image, load_page, load_with_fallback, ImageData, LoadedPage};
