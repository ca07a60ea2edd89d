// SPDX-License-Identifier: MPL-2.0
//! Resolution of the page catalog and asset base at launch.
//!
//! Asset directory precedence: `--assets`, then `gallery.asset_dir`, then
//! [`DEFAULT_ASSET_DIR`] relative to the working directory. The directory
//! bundled with the crate is always registered as the fallback.

use super::Flags;
use crate::config::{Config, DEFAULT_ASSET_DIR, MAX_IMAGE_COUNT};
use crate::error::StartupError;
use crate::gallery::{check_startup, AssetBase, Catalog};
use crate::i18n::fluent::I18n;
use std::path::PathBuf;

/// Everything the startup error panel needs to explain a refusal to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub error: StartupError,
    pub asset_dir: PathBuf,
    pub fallback_dir: Option<PathBuf>,
    pub image_count: usize,
    /// Warnings and errors recorded before the refusal, as timestamped lines.
    pub history: Vec<String>,
}

impl StartupReport {
    /// Localized diagnostic lines shown under the error message.
    #[must_use]
    pub fn detail_lines(&self, i18n: &I18n) -> Vec<String> {
        let mut lines = vec![i18n.tr_with_args(
            "startup-error-asset-dir",
            &[("path", self.asset_dir.display().to_string())],
        )];
        if let Some(fallback) = &self.fallback_dir {
            lines.push(i18n.tr_with_args(
                "startup-error-fallback-dir",
                &[("path", fallback.display().to_string())],
            ));
        }
        lines.push(i18n.tr_with_args(
            "startup-error-image-count",
            &[("count", self.image_count.to_string())],
        ));
        lines.push(self.error.to_string());
        lines.extend(self.history.iter().cloned());
        lines
    }
}

/// Asset base from CLI flags and configuration.
#[must_use]
pub fn asset_base(flags: &Flags, config: &Config) -> AssetBase {
    let primary = flags
        .assets
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| config.gallery.asset_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR));
    AssetBase::new(primary).with_fallback(AssetBase::bundled_dir())
}

/// Page count from CLI flags and configuration.
#[must_use]
pub fn image_count(flags: &Flags, config: &Config) -> usize {
    flags
        .count
        .map_or_else(|| config.gallery.image_count(), |count| count.min(MAX_IMAGE_COUNT))
}

/// Builds the catalog, or the report describing why the gallery cannot start.
pub fn prepare(flags: &Flags, config: &Config) -> Result<Catalog, StartupReport> {
    let base = asset_base(flags, config);
    let count = image_count(flags, config);
    let catalog = Catalog::generate(count, &config.gallery.image_extension(), &base);

    check_startup(&catalog, &base).map_err(|error| StartupReport {
        error,
        asset_dir: base.primary().to_path_buf(),
        fallback_dir: base.fallback().map(PathBuf::from),
        image_count: count,
        history: Vec::new(),
    })?;

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn cli_assets_take_precedence_over_config() {
        let mut config = Config::default();
        config.gallery.asset_dir = Some(PathBuf::from("/from/config"));

        let flags = Flags {
            assets: Some("/from/cli".to_string()),
            ..Flags::default()
        };
        assert_eq!(asset_base(&flags, &config).primary(), PathBuf::from("/from/cli"));

        let base = asset_base(&Flags::default(), &config);
        assert_eq!(base.primary(), PathBuf::from("/from/config"));
        assert_eq!(base.fallback(), Some(AssetBase::bundled_dir().as_path()));
    }

    #[test]
    fn default_asset_dir_is_relative() {
        let base = asset_base(&Flags::default(), &Config::default());
        assert_eq!(base.primary(), PathBuf::from(DEFAULT_ASSET_DIR));
    }

    #[test]
    fn cli_count_is_clamped() {
        let flags = Flags {
            count: Some(MAX_IMAGE_COUNT + 1),
            ..Flags::default()
        };
        assert_eq!(image_count(&flags, &Config::default()), MAX_IMAGE_COUNT);
        assert_eq!(image_count(&Flags::default(), &Config::default()), 24);
    }

    #[test]
    fn prepare_builds_catalog_for_reachable_assets() {
        let dir = tempdir().expect("failed to create temp dir");
        let flags = Flags {
            assets: Some(dir.path().display().to_string()),
            count: Some(3),
            ..Flags::default()
        };

        let catalog = prepare(&flags, &Config::default()).expect("catalog");
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get(0).map(|d| d.source.clone()),
            Some(dir.path().join("page1.png"))
        );
    }

    #[test]
    fn prepare_reports_empty_catalog_with_context() {
        let flags = Flags {
            assets: Some("/nonexistent/pages".to_string()),
            count: Some(0),
            ..Flags::default()
        };

        let report = prepare(&flags, &Config::default()).expect_err("should refuse to start");
        assert_eq!(report.error, StartupError::EmptyCatalog);
        assert_eq!(report.image_count, 0);
        assert_eq!(report.asset_dir, PathBuf::from("/nonexistent/pages"));

        let lines = report.detail_lines(&I18n::default());
        assert!(lines.iter().any(|line| line.contains("/nonexistent/pages")));
        assert!(lines.iter().any(|line| line.contains('0')));
        assert!(report.history.is_empty());
    }

    #[test]
    fn detail_lines_end_with_recorded_history() {
        let report = StartupReport {
            error: StartupError::EmptyCatalog,
            asset_dir: PathBuf::from("images"),
            fallback_dir: None,
            image_count: 0,
            history: vec!["+0.0s [WARN] settings ignored".to_string()],
        };

        let lines = report.detail_lines(&I18n::default());
        assert_eq!(lines.last().map(String::as_str), Some("+0.0s [WARN] settings ignored"));
        assert_eq!(lines[lines.len() - 2], StartupError::EmptyCatalog.to_string());
    }
}
