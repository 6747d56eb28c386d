//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_cue;
pub mod clipboard;
pub mod config;
pub mod file_cache;
pub mod index_store;
pub mod notifier;

// Re-export common types
pub use audio_cue::{AudioCue, AudioCueError, AudioCueType};
pub use clipboard::{ClipboardError, SystemClipboard};
pub use config::ConfigStore;
pub use file_cache::{CacheError, FileContentCache};
pub use index_store::{IndexStore, IndexStoreError};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
