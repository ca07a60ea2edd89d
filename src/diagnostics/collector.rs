// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector storing recent events in a circular buffer.
//!
//! Warnings and errors are also echoed to stderr. The stored history is read
//! back as timestamped lines by the startup error panel and the load-failure
//! banner.

use super::{
    AppStateEvent, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    UserAction,
};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    echo_problems: bool,
    started_at: Instant,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            buffer: CircularBuffer::new(capacity),
            echo_problems: true,
            started_at: Instant::now(),
        }
    }

    /// Collector that keeps events without writing to stderr.
    #[cfg(test)]
    pub(crate) fn silent(capacity: BufferCapacity) -> Self {
        Self {
            echo_problems: false,
            ..Self::new(capacity)
        }
    }

    pub fn log_action(&mut self, action: UserAction) {
        self.push(DiagnosticEventKind::UserAction { action });
    }

    pub fn log_state(&mut self, state: AppStateEvent) {
        self.push(DiagnosticEventKind::AppState { state });
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.push(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.push(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }

    fn push(&mut self, kind: DiagnosticEventKind) {
        if self.echo_problems && kind.is_problem() {
            eprintln!("{kind}");
        }
        self.buffer.push(DiagnosticEvent::new(kind));
    }

    /// Events in chronological order (oldest first).
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Warnings and errors only.
    pub fn problems(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter().filter(|event| event.kind.is_problem())
    }

    /// The last `limit` events of any kind, formatted as `+S.Ss [KIND] ...`.
    #[must_use]
    pub fn recent_lines(&self, limit: usize) -> Vec<String> {
        self.buffer
            .latest(limit)
            .map(|event| self.format_line(event))
            .collect()
    }

    /// The last `limit` warnings and errors, formatted like [`Self::recent_lines`].
    #[must_use]
    pub fn problem_lines(&self, limit: usize) -> Vec<String> {
        let problems: Vec<&DiagnosticEvent> = self.problems().collect();
        let skip = problems.len().saturating_sub(limit);
        problems
            .into_iter()
            .skip(skip)
            .map(|event| self.format_line(event))
            .collect()
    }

    fn format_line(&self, event: &DiagnosticEvent) -> String {
        let offset = event.timestamp.saturating_duration_since(self.started_at);
        format!("+{:.1}s {}", offset.as_secs_f32(), event.kind)
    }
}
