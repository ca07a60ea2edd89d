// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for gallery activity.

use std::fmt;
use std::time::Instant;

/// User-initiated actions worth recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    NavigateNext,
    NavigatePrevious,
    /// The track settled on a page after free scrolling.
    SnapToPage { index: usize },
    /// A double tap restored a page's identity transform.
    ResetZoom { index: usize },
}

/// Application state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppStateEvent {
    GalleryReady { pages: usize },
    PageLoaded { index: usize, from_fallback: bool },
    TouchDetected,
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEventKind {
    UserAction { action: UserAction },
    AppState { state: AppStateEvent },
    /// Non-critical issue, e.g. a page served from the fallback directory.
    Warning { message: String },
    /// Operation failure, e.g. a page that could not be decoded.
    Error { message: String },
}

impl DiagnosticEventKind {
    #[must_use]
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::Warning { .. } | Self::Error { .. })
    }
}

impl fmt::Display for DiagnosticEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserAction { action } => write!(f, "[ACTION] {action:?}"),
            Self::AppState { state } => write!(f, "[STATE] {state:?}"),
            Self::Warning { message } => write!(f, "[WARN] {message}"),
            Self::Error { message } => write!(f, "[ERROR] {message}"),
        }
    }
}
