//! System clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::classify::RawClipboardItem;
use crate::domain::snapshot::ClipboardPayload;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Clipboard write rejected: {0}")]
    WriteRejected(String),
}

/// Port for the system clipboard.
///
/// The clipboard is an external, uncontrollable owner: content can change
/// between any two calls. The watcher copes with that through the change
/// counter protocol, so implementations only guarantee that `change_count`
/// is monotonic and advances whenever content changes.
#[async_trait]
pub trait SystemClipboard: Send + Sync {
    /// Read the clipboard's opaque change counter.
    ///
    /// # Returns
    /// A value that is monotonically non-decreasing and differs from the
    /// previously returned value whenever content changed in between.
    async fn change_count(&self) -> Result<u64, ClipboardError>;

    /// Enumerate the currently offered items with all their
    /// representations. A single change can offer several items
    /// (e.g. a multi-select file copy).
    async fn read_items(&self) -> Result<Vec<RawClipboardItem>, ClipboardError>;

    /// Replace the clipboard contents with a single payload, populating
    /// every representation the platform supports for it.
    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl SystemClipboard for Box<dyn SystemClipboard> {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        self.as_ref().change_count().await
    }

    async fn read_items(&self) -> Result<Vec<RawClipboardItem>, ClipboardError> {
        self.as_ref().read_items().await
    }

    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardError> {
        self.as_ref().write(payload).await
    }
}
