// SPDX-License-Identifier: MPL-2.0
//! Custom widgets.

pub mod animated_spinner;
pub mod transformed_image;

pub use transformed_image::TransformedImage;
