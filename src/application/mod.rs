//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod engine;
pub mod ports;
pub mod watcher;

// Re-export use cases
pub use engine::{ClipboardEngine, CommitOutcome, EngineConfig, EngineError};
pub use watcher::{ClipboardWatcher, TickOutcome};
