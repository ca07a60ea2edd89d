// SPDX-License-Identifier: MPL-2.0
//! Registry of slides taking part in visibility tracking.
//!
//! Registration is keyed by the stable descriptor id and is idempotent:
//! watching the full slide list again after more slides have loaded only
//! adds the identities that were not known yet.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct SlideWatcher {
    watched: BTreeSet<u32>,
}

impl SlideWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Watches every id in `ids`, returning how many were newly added.
    pub fn watch_all(&mut self, ids: impl IntoIterator<Item = u32>) -> usize {
        ids.into_iter().filter(|id| self.watched.insert(*id)).count()
    }

    #[must_use]
    pub fn is_watched(&self, id: u32) -> bool {
        self.watched.contains(&id)
    }
}
