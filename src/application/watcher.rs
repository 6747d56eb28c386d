//! Clipboard watcher use case
//!
//! Polls the system clipboard through the `SystemClipboard` port. The
//! underlying clipboard exposes no push notifications, so polling is the
//! design, not a workaround: each tick compares the clipboard's opaque
//! change counter against the last recorded value and only reads and
//! classifies content when they differ.

use crate::application::ports::{ClipboardError, SystemClipboard};
use crate::domain::classify::classify;
use crate::domain::history::{HistoryStore, InsertOutcome};
use crate::domain::snapshot::ClipboardSnapshot;

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Change counter matched the recorded value; nothing was read
    Unchanged,
    /// The counter differed; every offered item was classified and
    /// inserted, in offer order
    Ingested { outcomes: Vec<InsertOutcome> },
}

impl TickOutcome {
    /// Whether this tick mutated the history store
    pub fn changed_history(&self) -> bool {
        match self {
            Self::Unchanged => false,
            Self::Ingested { outcomes } => !outcomes.is_empty(),
        }
    }
}

/// Polling clipboard watcher.
///
/// Owns the recorded change counter; the caller owns the tick cadence
/// (a skipping interval, so a slow tick is never re-entered) and the
/// history store the watcher feeds.
pub struct ClipboardWatcher<C: SystemClipboard> {
    clipboard: C,
    last_change: Option<u64>,
    generation: u64,
}

impl<C: SystemClipboard> ClipboardWatcher<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            clipboard,
            last_change: None,
            generation: 0,
        }
    }

    /// Completed-tick count, for diagnostics
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The change counter recorded after the last processed tick
    pub fn last_change(&self) -> Option<u64> {
        self.last_change
    }

    /// Run one polling tick.
    ///
    /// The counter recorded on success is the value read at tick start:
    /// if the clipboard changes again mid-tick the counter advances past
    /// it and the next tick picks the newer content up. A tick is never
    /// skipped while the counter differs from the recorded value.
    pub async fn tick(&mut self, store: &mut HistoryStore) -> Result<TickOutcome, ClipboardError> {
        let count = self.clipboard.change_count().await?;
        if self.last_change == Some(count) {
            return Ok(TickOutcome::Unchanged);
        }

        let items = self.clipboard.read_items().await?;
        let mut outcomes = Vec::with_capacity(items.len());
        for item in &items {
            let snapshot = ClipboardSnapshot::capture(classify(item));
            outcomes.push(store.insert(snapshot));
        }

        // Recorded only after processing completed, so a failed tick is
        // retried in full on the next one.
        self.last_change = Some(count);
        self.generation += 1;
        Ok(TickOutcome::Ingested { outcomes })
    }

    /// Write a snapshot's payload back as the clipboard's sole content.
    ///
    /// The recorded counter is reconciled against the post-write value so
    /// the write-back is not re-ingested as an external change on the
    /// next tick.
    pub async fn activate(&mut self, snapshot: &ClipboardSnapshot) -> Result<(), ClipboardError> {
        self.clipboard.write(snapshot.payload()).await?;
        self.last_change = Some(self.clipboard.change_count().await?);
        Ok(())
    }
}
