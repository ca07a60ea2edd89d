// SPDX-License-Identifier: MPL-2.0
//! Page image loading and decoding.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }

    /// Intrinsic size in pixels as floats, for layout math.
    #[must_use]
    pub fn size(&self) -> iced::Size {
        #[allow(clippy::cast_precision_loss)]
        iced::Size::new(self.width as f32, self.height as f32)
    }
}

/// A decoded page together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub image: ImageData,
    pub path: PathBuf,
    /// Whether the primary path failed and the fallback path was used.
    pub from_fallback: bool,
}

/// Load an image from the given path and return its data.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Image`] if
/// the bytes are not a decodable image.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let img_bytes = fs::read(path.as_ref())?;
    let img = image_rs::load_from_memory(&img_bytes)?;

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Image("image has empty dimensions".into()));
    }

    let pixels = img.to_rgba8().into_vec();
    Ok(ImageData::from_rgba(width, height, pixels))
}

/// Loads `primary`, trying `fallback` exactly once if that fails.
///
/// When both fail, the primary error is returned.
pub fn load_with_fallback(primary: &Path, fallback: Option<&Path>) -> Result<LoadedPage> {
    match load_image(primary) {
        Ok(image) => Ok(LoadedPage {
            image,
            path: primary.to_path_buf(),
            from_fallback: false,
        }),
        Err(primary_error) => {
            let Some(fallback) = fallback else {
                return Err(primary_error);
            };
            load_image(fallback)
                .map(|image| LoadedPage {
                    image,
                    path: fallback.to_path_buf(),
                    from_fallback: true,
                })
                .map_err(|_| primary_error)
        }
    }
}

/// Decodes a page on the blocking pool so the UI thread stays responsive.
pub async fn load_page(primary: PathBuf, fallback: Option<PathBuf>) -> Result<LoadedPage> {
    tokio::task::spawn_blocking(move || load_with_fallback(&primary, fallback.as_deref()))
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}
