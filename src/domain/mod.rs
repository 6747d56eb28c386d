//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod classify;
pub mod config;
pub mod error;
pub mod history;
pub mod selection;
pub mod session;
pub mod snapshot;

// Re-export common types
pub use classify::{classify, summarize, RawClipboardItem, Representation};
pub use config::{AppConfig, PollInterval};
pub use error::*;
pub use history::{HistoryStore, InsertOutcome, OutOfRange, StoreEvent, CAPACITY};
pub use selection::{MoveOutcome, SelectionCursor};
pub use session::{BrowseSession, BrowseState, InvalidStateTransition};
pub use snapshot::{ClipboardPayload, ClipboardSnapshot, ImageEncoding, SnapshotId};
