// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::gallery;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    /// Show or hide the diagnostic lines of the startup error panel.
    ToggleErrorDetails,
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional directory holding the `page{K}.{ext}` files.
    pub assets: Option<String>,
    /// Optional page count override.
    pub count: Option<usize>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PAGE_GALLERY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
