// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Image(String),
    Config(String),
    Startup(StartupError),
}

/// Reasons the gallery refuses to start.
/// Rendered by the startup error panel with the diagnostic context attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// The catalog would contain no pages.
    EmptyCatalog,

    /// Neither the configured asset directory nor the fallback exists.
    AssetDirectoryMissing {
        primary: String,
        fallback: Option<String>,
    },
}

impl StartupError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StartupError::EmptyCatalog => "startup-error-empty-catalog",
            StartupError::AssetDirectoryMissing { .. } => "startup-error-asset-dir-missing",
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::EmptyCatalog => write!(f, "Image count must be at least 1"),
            StartupError::AssetDirectoryMissing { primary, fallback } => match fallback {
                Some(fallback) => write!(
                    f,
                    "Asset directory not found: {} (fallback {} not found either)",
                    primary, fallback
                ),
                None => write!(f, "Asset directory not found: {}", primary),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Startup(e) => write!(f, "Startup Error: {}", e),
        }
    }
}

impl From<StartupError> for Error {
    fn from(err: StartupError) -> Self {
        Error::Startup(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            other => Error::Image(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
