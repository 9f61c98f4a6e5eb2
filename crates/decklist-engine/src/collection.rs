use std::collections::HashMap;

use crate::identity::CardIdentity;

/// Read-only view of the locally tracked collection.
///
/// Backed externally by a periodically resynced store; the engine never
/// mutates it during a render. "No collection loaded" (`has_any_data` false)
/// is a distinct state from "loaded but this card is absent" (count 0).
pub trait CollectionSource {
    /// Owned copies for one identity, `None` when the store has no entry.
    fn count(&self, identity: &CardIdentity) -> Option<u32>;

    /// Whether any collection data exists at all. Decided once per
    /// document, never per line.
    fn has_any_data(&self) -> bool;
}

/// In-memory collection counts, used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct CollectionCounts {
    counts: HashMap<CardIdentity, u32>,
}

impl CollectionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records owned copies for a display name, normalizing the key.
    pub fn set(&mut self, display_name: &str, count: u32) {
        self.counts.insert(CardIdentity::normalize(display_name), count);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl CollectionSource for CollectionCounts {
    fn count(&self, identity: &CardIdentity) -> Option<u32> {
        self.counts.get(identity).copied()
    }

    fn has_any_data(&self) -> bool {
        !self.counts.is_empty()
    }
}
