// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Catalog**: Page count and file naming
//! - **Preload**: Lazy-loading window around the current slide
//! - **Zoom**: Pinch zoom bounds and sensitivity
//! - **Animation**: Scroll and reset transition timings
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Catalog Defaults
// ==========================================================================

/// Number of pages shipped with the gallery.
pub const DEFAULT_IMAGE_COUNT: usize = 24;

/// Maximum number of pages accepted from config or CLI.
pub const MAX_IMAGE_COUNT: usize = 10_000;

/// Default file extension of page images.
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Default asset directory, relative to the working directory.
pub const DEFAULT_ASSET_DIR: &str = "images";

// ==========================================================================
// Preload Defaults
// ==========================================================================

/// Slides loaded before the current one.
pub const DEFAULT_PRELOAD_BEHIND: usize = 1;

/// Slides loaded after the current one.
pub const DEFAULT_PRELOAD_AHEAD: usize = 2;

/// Upper bound for either side of the preload window.
pub const MAX_PRELOAD_DISTANCE: usize = 8;

/// Fraction of a slide that must be visible for it to become current.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Identity scale; pinching never goes below it.
pub const MIN_SCALE: f32 = 1.0;

/// Default maximum pinch scale.
pub const DEFAULT_MAX_SCALE: f32 = 5.0;

/// Hard upper limit for a configured maximum scale.
pub const MAX_SCALE_LIMIT: f32 = 20.0;

/// Scale change per pixel of inter-finger distance change.
pub const DEFAULT_PINCH_SENSITIVITY: f32 = 0.01;

/// Minimum allowed pinch sensitivity.
pub const MIN_PINCH_SENSITIVITY: f32 = 0.001;

/// Maximum allowed pinch sensitivity.
pub const MAX_PINCH_SENSITIVITY: f32 = 0.1;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Duration of the ease-out transition back to identity scale (ms).
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Maximum configurable transition duration (ms).
pub const MAX_TRANSITION_MS: u64 = 2_000;

/// Duration of the smooth scroll when navigating between slides (ms).
pub const SCROLL_ANIMATION_MS: u64 = 300;

/// Scroll idle time before snapping to the nearest slide (ms).
pub const SNAP_IDLE_MS: u64 = 150;

/// Tick interval for animations (ms), roughly one frame at 60 Hz.
pub const ANIMATION_TICK_MS: u64 = 16;

/// Two presses closer than this are a double-tap / double-click (ms).
pub const DOUBLE_TAP_THRESHOLD_MS: u64 = 350;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events retained in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 256;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 4_096;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_IMAGE_COUNT > 0);
    assert!(DEFAULT_IMAGE_COUNT <= MAX_IMAGE_COUNT);

    assert!(DEFAULT_PRELOAD_BEHIND <= MAX_PRELOAD_DISTANCE);
    assert!(DEFAULT_PRELOAD_AHEAD <= MAX_PRELOAD_DISTANCE);
    assert!(VISIBILITY_THRESHOLD > 0.0);
    assert!(VISIBILITY_THRESHOLD <= 1.0);

    assert!(MIN_SCALE > 0.0);
    assert!(DEFAULT_MAX_SCALE > MIN_SCALE);
    assert!(MAX_SCALE_LIMIT >= DEFAULT_MAX_SCALE);
    assert!(MIN_PINCH_SENSITIVITY > 0.0);
    assert!(DEFAULT_PINCH_SENSITIVITY >= MIN_PINCH_SENSITIVITY);
    assert!(DEFAULT_PINCH_SENSITIVITY <= MAX_PINCH_SENSITIVITY);

    assert!(DEFAULT_TRANSITION_MS <= MAX_TRANSITION_MS);
    assert!(ANIMATION_TICK_MS > 0);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
