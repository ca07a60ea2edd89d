// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, read once at startup
//! from a `settings.toml` file. The gallery never writes it back.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[gallery]` - Asset location, page count and preload window
//! - `[zoom]` - Pinch zoom limits and reset transition
//! - `[input]` - Touch capability override
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. `--config-dir` CLI argument or `PAGE_GALLERY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use page_gallery::config::{self, Config};
//!
//! let (config, warning) = config::load();
//! if warning.is_some() {
//!     eprintln!("settings.toml ignored, using defaults");
//! }
//! println!("{} pages", config.gallery.image_count());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// i18n key reported when an existing config file cannot be parsed.
pub const CONFIG_LOAD_WARNING_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Light, dark, or follow the system.
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Page catalog and lazy-loading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Directory holding `page{K}.{ext}` files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_dir: Option<PathBuf>,

    /// Number of pages in the gallery.
    #[serde(default = "default_image_count", skip_serializing_if = "Option::is_none")]
    pub image_count: Option<usize>,

    /// File extension of the page images, without the dot.
    #[serde(
        default = "default_image_extension",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_extension: Option<String>,

    /// Slides loaded before the current one.
    #[serde(
        default = "default_preload_behind",
        skip_serializing_if = "Option::is_none"
    )]
    pub preload_behind: Option<usize>,

    /// Slides loaded after the current one.
    #[serde(
        default = "default_preload_ahead",
        skip_serializing_if = "Option::is_none"
    )]
    pub preload_ahead: Option<usize>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            asset_dir: None,
            image_count: default_image_count(),
            image_extension: default_image_extension(),
            preload_behind: default_preload_behind(),
            preload_ahead: default_preload_ahead(),
        }
    }
}

impl GalleryConfig {
    /// Page count clamped to `1..=MAX_IMAGE_COUNT`, or zero when explicitly zero.
    ///
    /// Zero is kept so the startup guard can report an empty catalog.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.image_count
            .unwrap_or(DEFAULT_IMAGE_COUNT)
            .min(MAX_IMAGE_COUNT)
    }

    #[must_use]
    pub fn image_extension(&self) -> String {
        self.image_extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_IMAGE_EXTENSION)
            .to_string()
    }

    #[must_use]
    pub fn preload_behind(&self) -> usize {
        self.preload_behind
            .unwrap_or(DEFAULT_PRELOAD_BEHIND)
            .min(MAX_PRELOAD_DISTANCE)
    }

    #[must_use]
    pub fn preload_ahead(&self) -> usize {
        self.preload_ahead
            .unwrap_or(DEFAULT_PRELOAD_AHEAD)
            .min(MAX_PRELOAD_DISTANCE)
    }
}

/// Pinch zoom settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoomConfig {
    /// Upper bound of the pinch scale.
    #[serde(default = "default_max_scale", skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f32>,

    /// Scale change per pixel of finger distance change.
    #[serde(
        default = "default_pinch_sensitivity",
        skip_serializing_if = "Option::is_none"
    )]
    pub pinch_sensitivity: Option<f32>,

    /// Duration of the ease-out transition back to identity scale (ms).
    #[serde(
        default = "default_transition_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_ms: Option<u64>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_scale: default_max_scale(),
            pinch_sensitivity: default_pinch_sensitivity(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl ZoomConfig {
    /// Maximum pinch scale, clamped to `MIN_SCALE..=MAX_SCALE_LIMIT`.
    #[must_use]
    pub fn max_scale(&self) -> f32 {
        self.max_scale
            .filter(|scale| scale.is_finite())
            .unwrap_or(DEFAULT_MAX_SCALE)
            .clamp(MIN_SCALE, MAX_SCALE_LIMIT)
    }

    #[must_use]
    pub fn pinch_sensitivity(&self) -> f32 {
        self.pinch_sensitivity
            .filter(|value| value.is_finite())
            .unwrap_or(DEFAULT_PINCH_SENSITIVITY)
            .clamp(MIN_PINCH_SENSITIVITY, MAX_PINCH_SENSITIVITY)
    }

    /// Reset transition length. Zero disables the animation.
    #[must_use]
    pub fn transition(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.transition_ms
                .unwrap_or(DEFAULT_TRANSITION_MS)
                .min(MAX_TRANSITION_MS),
        )
    }
}

/// Input device settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InputConfig {
    /// Declares the device touch-capable before the first touch event arrives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_capable: Option<bool>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub zoom: ZoomConfig,

    #[serde(default)]
    pub input: InputConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_image_count() -> Option<usize> {
    Some(DEFAULT_IMAGE_COUNT)
}

fn default_image_extension() -> Option<String> {
    Some(DEFAULT_IMAGE_EXTENSION.to_string())
}

fn default_preload_behind() -> Option<usize> {
    Some(DEFAULT_PRELOAD_BEHIND)
}

fn default_preload_ahead() -> Option<usize> {
    Some(DEFAULT_PRELOAD_AHEAD)
}

fn default_max_scale() -> Option<f32> {
    Some(DEFAULT_MAX_SCALE)
}

fn default_pinch_sensitivity() -> Option<f32> {
    Some(DEFAULT_PINCH_SENSITIVITY)
}

fn default_transition_ms() -> Option<u64> {
    Some(DEFAULT_TRANSITION_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(error) => {
                    eprintln!("[WARN] Ignoring {}: {}", path.display(), error);
                    return (Config::default(), Some(CONFIG_LOAD_WARNING_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Writes `config` as TOML to `path`, creating parent directories.
///
/// The application only reads settings; this is used to prepare settings
/// files, e.g. in tests.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
