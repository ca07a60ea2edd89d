// SPDX-License-Identifier: MPL-2.0
//! Toolkit-independent gallery model.
//!
//! - [`catalog`]: page descriptors and asset path resolution
//! - [`tracker`]: current slide, loaded set, navigation and snap targets
//! - [`watch`]: idempotent registry of slides taking part in visibility tracking

pub mod catalog;
pub mod tracker;
pub mod watch;

pub use catalog::{check_startup, AssetBase, Catalog, ImageDescriptor};
pub use tracker::{Direction, Observation, PreloadWindow, SlideTracker, TrackGeometry};
pub use watch::SlideWatcher;
