//! Bounded, deduplicating clipboard history
//!
//! Most-recent-first ordered store with move-to-front dedup and oldest-out
//! eviction under capacity pressure. Entries are created only by `insert`
//! and leave only by eviction, `remove`, or `clear`; they are never
//! mutated in place.

use std::collections::VecDeque;

use thiserror::Error;

use crate::domain::snapshot::{ClipboardPayload, ClipboardSnapshot, SnapshotId};

/// Fixed history capacity
pub const CAPACITY: usize = 20;

/// Typed failure for index access outside `[0, len)`
#[derive(Debug, Clone, Error)]
#[error("Index {index} out of range for history of length {len}")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// What `insert` did with the new snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// No equivalent entry existed and there was room
    Inserted,
    /// An equivalent entry existed; it was dropped and the new snapshot
    /// took index 0, refreshing capture metadata
    MovedToFront { replaced: SnapshotId },
    /// No equivalent entry existed and the store was full; the oldest
    /// entry was evicted to make room
    InsertedWithEviction { evicted: SnapshotId },
}

/// Structured change notification, delivered synchronously to observers
/// before the mutating call returns.
///
/// Departing payloads ride along on removal events so observers holding
/// derived state (a file-content cache keyed by path) can release it.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Inserted { id: SnapshotId },
    MovedToFront { id: SnapshotId, replaced: SnapshotId },
    Evicted { id: SnapshotId, payload: ClipboardPayload },
    Removed { id: SnapshotId, payload: ClipboardPayload },
    Cleared { ids: Vec<SnapshotId> },
}

type Observer = Box<dyn Fn(&StoreEvent) + Send>;

/// Bounded, ordered, deduplicating collection of snapshots.
///
/// Index 0 is the most recent entry. At rest no two entries are
/// equivalent; inserting an equivalent payload consolidates instead of
/// duplicating.
#[derive(Default)]
pub struct HistoryStore {
    entries: VecDeque<ClipboardSnapshot>,
    observers: Vec<Observer>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change observer. Observers run synchronously, in
    /// registration order, inside the mutating call.
    pub fn observe(&mut self, observer: impl Fn(&StoreEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a snapshot at the front, consolidating equivalents and
    /// evicting the oldest entry when full.
    pub fn insert(&mut self, snapshot: ClipboardSnapshot) -> InsertOutcome {
        let id = snapshot.id();

        if let Some(position) = self
            .entries
            .iter()
            .position(|existing| existing.is_equivalent_to(&snapshot))
        {
            // The new snapshot wins: same content seen again, fresher
            // capture metadata, promoted to the front.
            let replaced = self
                .entries
                .remove(position)
                .map(|old| old.id())
                .unwrap_or(id);
            self.entries.push_front(snapshot);
            self.emit(StoreEvent::MovedToFront { id, replaced });
            return InsertOutcome::MovedToFront { replaced };
        }

        if self.entries.len() >= CAPACITY {
            if let Some(oldest) = self.entries.pop_back() {
                let evicted = oldest.id();
                self.emit(StoreEvent::Evicted {
                    id: evicted,
                    payload: oldest.payload().clone(),
                });
                self.entries.push_front(snapshot);
                self.emit(StoreEvent::Inserted { id });
                return InsertOutcome::InsertedWithEviction { evicted };
            }
        }

        self.entries.push_front(snapshot);
        self.emit(StoreEvent::Inserted { id });
        InsertOutcome::Inserted
    }

    /// Entry at `index`, most-recent-first
    pub fn get(&self, index: usize) -> Result<&ClipboardSnapshot, OutOfRange> {
        self.entries.get(index).ok_or(OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Remove the entry at `index`
    pub fn remove(&mut self, index: usize) -> Result<ClipboardSnapshot, OutOfRange> {
        let removed = self.entries.remove(index).ok_or(OutOfRange {
            index,
            len: self.entries.len(),
        })?;
        self.emit(StoreEvent::Removed {
            id: removed.id(),
            payload: removed.payload().clone(),
        });
        Ok(removed)
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let ids = self.entries.iter().map(ClipboardSnapshot::id).collect();
        self.entries.clear();
        self.emit(StoreEvent::Cleared { ids });
    }

    /// Iterate entries most-recent-first
    pub fn iter(&self) -> impl Iterator<Item = &ClipboardSnapshot> {
        self.entries.iter()
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}
