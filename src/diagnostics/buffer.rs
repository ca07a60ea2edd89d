// SPDX-License-Identifier: MPL-2.0
//! Bounded event log backing the diagnostics collector.

use crate::config::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};
use std::collections::VecDeque;

/// Number of events retained, clamped to the diagnostics bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            MIN_DIAGNOSTICS_BUFFER_CAPACITY,
            MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        ))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

/// Ring of the most recent entries, oldest first.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    entries: VecDeque<T>,
    limit: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let limit = capacity.value();
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Appends `entry`, dropping the oldest one once the ring is full.
    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries.iter()
    }

    /// The last `count` entries, oldest first.
    pub fn latest(&self, count: usize) -> impl Iterator<Item = &T> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(values: impl IntoIterator<Item = u32>) -> CircularBuffer<u32> {
        let mut buffer = CircularBuffer::new(BufferCapacity::new(0));
        for value in values {
            buffer.push(value);
        }
        buffer
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(
            BufferCapacity::new(0).value(),
            MIN_DIAGNOSTICS_BUFFER_CAPACITY
        );
        assert_eq!(
            BufferCapacity::new(usize::MAX).value(),
            MAX_DIAGNOSTICS_BUFFER_CAPACITY
        );
        assert_eq!(
            BufferCapacity::default().value(),
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn full_ring_drops_oldest() {
        let total = MIN_DIAGNOSTICS_BUFFER_CAPACITY as u32 + 4;
        let buffer = ring(0..total);

        assert_eq!(buffer.iter().count(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(buffer.iter().next(), Some(&4));
        assert_eq!(buffer.iter().next_back(), Some(&(total - 1)));
    }

    #[test]
    fn latest_keeps_chronological_order() {
        let buffer = ring([1, 2, 3, 4]);
        assert_eq!(buffer.latest(2).copied().collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(buffer.latest(10).count(), 4);
        assert_eq!(buffer.latest(0).count(), 0);
    }
}
