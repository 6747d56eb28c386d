//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the system clipboard, filesystem, and desktop services.

pub mod audio_cue;
pub mod cache;
pub mod clipboard;
pub mod config;
pub mod index;
pub mod notification;

// Re-export adapters
pub use audio_cue::{create_audio_cue, NoOpAudioCue, RodioAudioCue};
pub use cache::ChunkFileCache;
pub use clipboard::{create_clipboard, ArboardClipboard};
pub use config::XdgConfigStore;
pub use index::XdgIndexStore;
pub use notification::{create_notifier, NoopNotifier, NotifyRustNotifier};
