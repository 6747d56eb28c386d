//! Clipboard history engine use case
//!
//! Owns the history store, the browsing cursor, the session state
//! machine, and the watcher, and wires them to the collaborator ports
//! (persisted index, file-content cache, notifier, audio cue). All
//! mutations run on the single task that owns this value; collaborators
//! doing I/O hand their results back through futures.

use std::sync::Arc;

use thiserror::Error;

use crate::application::ports::{
    AudioCue, AudioCueType, FileContentCache, IndexStore, NotificationIcon, Notifier,
    SystemClipboard,
};
use crate::application::watcher::{ClipboardWatcher, TickOutcome};
use crate::domain::classify::summarize;
use crate::domain::config::app_config::DEFAULT_MAX_TEXT_PREVIEW;
use crate::domain::history::{HistoryStore, OutOfRange, StoreEvent};
use crate::domain::selection::{MoveOutcome, SelectionCursor};
use crate::domain::session::{BrowseSession, BrowseState, InvalidStateTransition};
use crate::domain::snapshot::{ClipboardPayload, ClipboardSnapshot};

use super::ports::ClipboardError;

/// Errors from the engine use case
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Clipboard failed: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether to surface non-fatal notices as desktop notifications
    pub enable_notify: bool,
    /// Whether to play the audible boundary/commit cues
    pub enable_cue: bool,
    /// Cap on characters in text preview lines
    pub max_text_preview: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_notify: false,
            enable_cue: true,
            max_text_preview: DEFAULT_MAX_TEXT_PREVIEW,
        }
    }
}

/// What committing a selection accomplished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The store was empty; nothing to write back
    Empty,
    /// The selected snapshot was written back to the clipboard
    Written { index: usize, summary: String },
    /// The OS refused the write; history is unaffected
    WriteFailed { index: usize, reason: String },
}

/// Clipboard history engine
pub struct ClipboardEngine<C, I, F, N, A>
where
    C: SystemClipboard,
    I: IndexStore,
    F: FileContentCache + 'static,
    N: Notifier,
    A: AudioCue,
{
    store: HistoryStore,
    watcher: ClipboardWatcher<C>,
    cursor: SelectionCursor,
    session: BrowseSession,
    index_store: I,
    cache: Arc<F>,
    notifier: N,
    cue: A,
    config: EngineConfig,
}

impl<C, I, F, N, A> ClipboardEngine<C, I, F, N, A>
where
    C: SystemClipboard,
    I: IndexStore,
    F: FileContentCache + 'static,
    N: Notifier,
    A: AudioCue,
{
    /// Create a new engine instance.
    ///
    /// The cache is registered as a store observer so file-reference
    /// content is released the moment its entry leaves the history.
    pub fn new(
        clipboard: C,
        index_store: I,
        cache: Arc<F>,
        notifier: N,
        cue: A,
        config: EngineConfig,
    ) -> Self {
        let mut store = HistoryStore::new();

        let cache_observer = Arc::clone(&cache);
        store.observe(move |event| match event {
            StoreEvent::Evicted { payload, .. } | StoreEvent::Removed { payload, .. } => {
                if let ClipboardPayload::FileReference(path) = payload {
                    cache_observer.invalidate(path);
                }
            }
            StoreEvent::Cleared { .. } => cache_observer.invalidate_all(),
            StoreEvent::Inserted { .. } | StoreEvent::MovedToFront { .. } => {}
        });

        Self {
            store,
            watcher: ClipboardWatcher::new(clipboard),
            cursor: SelectionCursor::new(),
            session: BrowseSession::new(),
            index_store,
            cache,
            notifier,
            cue,
            config,
        }
    }

    /// Register an observer for history change events (for the
    /// presentation shell). Events are delivered synchronously inside
    /// the mutating call.
    pub fn observe(&mut self, observer: impl Fn(&StoreEvent) + Send + 'static) {
        self.store.observe(observer);
    }

    /// Run one watcher tick against the history
    pub async fn tick(&mut self) -> Result<TickOutcome, ClipboardError> {
        let outcome = self.watcher.tick(&mut self.store).await?;
        if outcome.changed_history() {
            self.cursor.on_store_changed();
        }
        Ok(outcome)
    }

    /// Current session state
    pub fn state(&self) -> BrowseState {
        self.session.state()
    }

    pub fn length(&self) -> usize {
        self.store.len()
    }

    pub fn current_index(&self) -> usize {
        self.cursor.current()
    }

    pub fn snapshot(&self, index: usize) -> Result<&ClipboardSnapshot, OutOfRange> {
        self.store.get(index)
    }

    /// Activate chord: open a browse session at the persisted position
    /// (clamped to 0 when stale or out of range).
    pub async fn open_browser(&mut self) -> Result<usize, EngineError> {
        self.session.open()?;
        let saved = self.index_store.load_index().await.unwrap_or(None);
        self.cursor
            .load_persisted(saved.unwrap_or(0), self.store.len());
        Ok(self.cursor.current())
    }

    /// Deactivate chord: commit the current selection, write it back to
    /// the clipboard, persist the browsing position, and close the
    /// session. A rejected write is a non-fatal notice; history is
    /// unaffected either way.
    pub async fn commit_selection(&mut self) -> Result<CommitOutcome, EngineError> {
        self.session.commit()?;

        if self.store.is_empty() {
            return Ok(CommitOutcome::Empty);
        }

        let index = self.cursor.current();
        // Owned deep copy, so later clipboard mutation cannot alias
        // stored history
        let snapshot = self.store.get(index)?.clone();
        let summary = summarize(snapshot.payload(), self.config.max_text_preview);

        if let Err(error) = self.index_store.save_index(self.cursor.persist()).await {
            // Losing the browsing position is cosmetic; keep going
            let _ = error;
        }

        match self.watcher.activate(&snapshot).await {
            Ok(()) => {
                if self.config.enable_cue {
                    let _ = self.cue.play(AudioCueType::Committed).await;
                }
                Ok(CommitOutcome::Written { index, summary })
            }
            Err(error) => {
                let reason = error.to_string();
                if self.config.enable_notify {
                    let _ = self
                        .notifier
                        .notify(
                            "ClipStack",
                            &format!("Could not write back entry: {}", reason),
                            NotificationIcon::Warning,
                        )
                        .await;
                }
                Ok(CommitOutcome::WriteFailed { index, reason })
            }
        }
    }

    /// Close the browse session without writing anything back
    pub fn cancel_browsing(&mut self) -> Result<(), EngineError> {
        self.session.cancel()?;
        Ok(())
    }

    /// Step the cursor towards the most recent entry, cueing at the edge
    pub async fn move_left(&mut self) -> MoveOutcome {
        let outcome = self.cursor.move_left(self.store.len());
        if outcome == MoveOutcome::Boundary && self.config.enable_cue {
            let _ = self.cue.play(AudioCueType::BoundaryHit).await;
        }
        outcome
    }

    /// Step the cursor towards the oldest entry, cueing at the edge
    pub async fn move_right(&mut self) -> MoveOutcome {
        let outcome = self.cursor.move_right(self.store.len());
        if outcome == MoveOutcome::Boundary && self.config.enable_cue {
            let _ = self.cue.play(AudioCueType::BoundaryHit).await;
        }
        outcome
    }

    /// Preview text for the entry at `index`.
    ///
    /// File references resolve their first chunk of text through the
    /// cache collaborator; an unreadable file renders a placeholder and
    /// never fails the call.
    pub async fn preview(&self, index: usize) -> Result<String, OutOfRange> {
        let snapshot = self.store.get(index)?;
        let headline = summarize(snapshot.payload(), self.config.max_text_preview);

        let preview = match snapshot.payload() {
            ClipboardPayload::FileReference(path) => {
                match self.cache.request_text(path).await {
                    Ok(Some(text)) => {
                        let snippet =
                            summarize(&ClipboardPayload::Text(text), self.config.max_text_preview);
                        format!("{}\n{}", headline, snippet)
                    }
                    Ok(None) => format!("{}\n[binary content]", headline),
                    Err(_) => format!("{}\n[unreadable]", headline),
                }
            }
            ClipboardPayload::Text(_)
            | ClipboardPayload::Image { .. }
            | ClipboardPayload::Unknown { .. } => headline,
        };
        Ok(preview)
    }

    /// Drop all history entries
    pub fn clear_history(&mut self) {
        self.store.clear();
        self.cursor.on_store_changed();
    }

    /// Process teardown: cancel any open session and clear the persisted
    /// index so the next run starts with a fresh browsing position.
    pub async fn shutdown(&mut self) {
        if self.session.is_browsing() {
            let _ = self.session.cancel();
        }
        let _ = self.index_store.clear_index().await;
    }
}
