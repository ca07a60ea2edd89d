// SPDX-License-Identifier: MPL-2.0
//! Page catalog: the immutable list of image descriptors shown by the gallery.
//!
//! Descriptors are generated once at startup from a page count using the
//! `page{K}.{ext}` naming convention. Paths are resolved against an
//! [`AssetBase`] injected by the launcher; nothing here inspects the
//! environment to guess where the pages live.

use crate::config::DEFAULT_ASSET_DIR;
use crate::error::StartupError;
use std::path::{Path, PathBuf};

/// Base directories that page file names are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBase {
    primary: PathBuf,
    fallback: Option<PathBuf>,
}

impl AssetBase {
    /// Creates a base with a single directory and no fallback.
    #[must_use]
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: None,
        }
    }

    /// Adds the directory tried once when loading from the primary one fails.
    ///
    /// A fallback equal to the primary directory is dropped.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        let fallback = fallback.into();
        self.fallback = (fallback != self.primary).then_some(fallback);
        self
    }

    /// The page directory shipped next to the crate sources, fixed at build time.
    #[must_use]
    pub fn bundled_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_ASSET_DIR)
    }

    #[must_use]
    pub fn primary(&self) -> &Path {
        &self.primary
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&Path> {
        self.fallback.as_deref()
    }

    #[must_use]
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.primary.join(file_name)
    }

    #[must_use]
    pub fn resolve_fallback(&self, file_name: &str) -> Option<PathBuf> {
        self.fallback.as_ref().map(|dir| dir.join(file_name))
    }

    /// First existing directory among primary and fallback.
    #[must_use]
    pub fn reachable_dir(&self) -> Option<&Path> {
        std::iter::once(self.primary.as_path())
            .chain(self.fallback.as_deref())
            .find(|dir| dir.is_dir())
    }
}

/// Immutable record identifying one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// 1-based, unique, equal to the slide index plus one.
    pub id: u32,
    pub title: String,
    pub file_name: String,
    /// Path under the primary asset directory.
    pub source: PathBuf,
    /// Path under the fallback asset directory, if one is configured.
    pub fallback_source: Option<PathBuf>,
}

/// Ordered list of page descriptors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    descriptors: Vec<ImageDescriptor>,
}

impl Catalog {
    /// Builds descriptors `page1.{ext}` ..= `page{count}.{ext}` ordered by id.
    #[must_use]
    pub fn generate(count: usize, extension: &str, base: &AssetBase) -> Self {
        let descriptors = (1..=count)
            .map(|number| {
                let file_name = format!("page{number}.{extension}");
                ImageDescriptor {
                    id: u32::try_from(number).unwrap_or(u32::MAX),
                    title: format!("Page {number}"),
                    source: base.resolve(&file_name),
                    fallback_source: base.resolve_fallback(&file_name),
                    file_name,
                }
            })
            .collect();
        Self { descriptors }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.descriptors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageDescriptor> {
        self.descriptors.iter()
    }

    /// Stable identities used to register slides with the visibility watcher.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.descriptors.iter().map(|descriptor| descriptor.id)
    }
}

/// Checks that the gallery has something to show before it is mounted.
pub fn check_startup(catalog: &Catalog, base: &AssetBase) -> Result<(), StartupError> {
    if catalog.is_empty() {
        return Err(StartupError::EmptyCatalog);
    }
    if base.reachable_dir().is_none() {
        return Err(StartupError::AssetDirectoryMissing {
            primary: base.primary().display().to_string(),
            fallback: base.fallback().map(|dir| dir.display().to_string()),
        });
    }
    Ok(())
}
