//! Mutation accounting.
//!
//! Every write a [`Handle`](super::Handle) performs against a live parent is
//! counted here. Document fragments are staging areas: moving a node into
//! one counts as a removal, moving it back out counts as an insertion, and
//! shuffling nodes between fragments is free.

use serde::Serialize;
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutation {
    Created,
    Inserted,
    Moved,
    Removed,
    AttributeSet,
    AttributeRemoved,
    DataWritten,
    PropertySet,
    ListenerAdded,
    ListenerRemoved,
}

#[derive(Debug, Default)]
pub(crate) struct MutationStats {
    counts: Cell<MutationCounts>,
}

impl MutationStats {
    pub(crate) fn record(&self, mutation: Mutation) {
        let mut counts = self.counts.get();
        let slot = match mutation {
            Mutation::Created => &mut counts.created,
            Mutation::Inserted => &mut counts.inserted,
            Mutation::Moved => &mut counts.moved,
            Mutation::Removed => &mut counts.removed,
            Mutation::AttributeSet => &mut counts.attributes_set,
            Mutation::AttributeRemoved => &mut counts.attributes_removed,
            Mutation::DataWritten => &mut counts.data_written,
            Mutation::PropertySet => &mut counts.properties_set,
            Mutation::ListenerAdded => &mut counts.listeners_added,
            Mutation::ListenerRemoved => &mut counts.listeners_removed,
        };
        *slot += 1;
        self.counts.set(counts);
    }

    pub(crate) fn snapshot(&self) -> MutationCounts {
        self.counts.get()
    }

    pub(crate) fn reset(&self) {
        self.counts.set(MutationCounts::default());
    }
}

/// A snapshot of the mutation counters of a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MutationCounts {
    /// Nodes created (including clones and imports).
    pub created: u64,
    /// Nodes placed under a live parent that were not under one before.
    pub inserted: u64,
    /// Nodes moved from one live position to another.
    pub moved: u64,
    /// Nodes taken out of a live parent.
    pub removed: u64,
    pub attributes_set: u64,
    pub attributes_removed: u64,
    /// Text or comment data writes.
    pub data_written: u64,
    /// Non-reflected property writes.
    pub properties_set: u64,
    pub listeners_added: u64,
    pub listeners_removed: u64,
}

impl MutationCounts {
    /// Counters accumulated after `earlier` was taken.
    pub fn since(&self, earlier: &MutationCounts) -> MutationCounts {
        MutationCounts {
            created: self.created.saturating_sub(earlier.created),
            inserted: self.inserted.saturating_sub(earlier.inserted),
            moved: self.moved.saturating_sub(earlier.moved),
            removed: self.removed.saturating_sub(earlier.removed),
            attributes_set: self.attributes_set.saturating_sub(earlier.attributes_set),
            attributes_removed: self.attributes_removed.saturating_sub(earlier.attributes_removed),
            data_written: self.data_written.saturating_sub(earlier.data_written),
            properties_set: self.properties_set.saturating_sub(earlier.properties_set),
            listeners_added: self.listeners_added.saturating_sub(earlier.listeners_added),
            listeners_removed: self.listeners_removed.saturating_sub(earlier.listeners_removed),
        }
    }

    /// Insertions, moves and removals.
    pub fn tree_operations(&self) -> u64 {
        self.inserted + self.moved + self.removed
    }

    /// Every counted write except node creation.
    pub fn writes(&self) -> u64 {
        self.tree_operations()
            + self.attributes_set
            + self.attributes_removed
            + self.data_written
            + self.properties_set
            + self.listeners_added
            + self.listeners_removed
    }

    /// True when nothing observable happened.
    pub fn is_quiet(&self) -> bool {
        self.created == 0 && self.writes() == 0
    }
}
