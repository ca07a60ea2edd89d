// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording gallery activity.
//!
//! Events are kept in a memory-bounded circular buffer. Warnings and errors
//! are echoed to stderr as they are recorded.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event
//! - [`DiagnosticsCollector`]: Owner of the buffer, used from the update loop

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::DiagnosticsCollector;
pub use events::{AppStateEvent, DiagnosticEvent, DiagnosticEventKind, UserAction};
