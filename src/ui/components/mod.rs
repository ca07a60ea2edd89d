// SPDX-License-Identifier: MPL-2.0
//! Reusable UI components.
//!
//! # Components
//!
//! - [`error_display`] - Consistent error presentation with expandable
//!   diagnostic details and i18n support

pub mod error_display;
