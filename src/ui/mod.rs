// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`gallery`] - Page track with lazy loading, counter and error banner
//!
//! # Shared Infrastructure
//!
//! - [`zoomable`] - Per-page pan and pinch-zoom state
//! - [`components`] - Reusable UI components (error display)
//! - [`widgets`] - Custom Iced widgets (spinner, transformed image)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod components;
pub mod design_tokens;
pub mod gallery;
pub mod theming;
pub mod widgets;
pub mod zoomable;
