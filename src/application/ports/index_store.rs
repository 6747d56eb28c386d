//! Persisted browse-index port interface

use async_trait::async_trait;
use thiserror::Error;

/// Index store errors
#[derive(Debug, Clone, Error)]
pub enum IndexStoreError {
    #[error("Failed to read persisted index: {0}")]
    ReadFailed(String),

    #[error("Failed to write persisted index: {0}")]
    WriteFailed(String),
}

/// Port for persisting the browsing position between sessions.
///
/// A single-integer key-value collaborator: no schema beyond one index.
/// A persisted value can be stale or out of range; callers clamp on load.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Persist the browsing index
    async fn save_index(&self, index: usize) -> Result<(), IndexStoreError>;

    /// Load the persisted index, if any
    async fn load_index(&self) -> Result<Option<usize>, IndexStoreError>;

    /// Clear the persisted index (fresh browsing position next session)
    async fn clear_index(&self) -> Result<(), IndexStoreError>;
}

/// Blanket implementation for boxed index store types
#[async_trait]
impl IndexStore for Box<dyn IndexStore> {
    async fn save_index(&self, index: usize) -> Result<(), IndexStoreError> {
        self.as_ref().save_index(index).await
    }

    async fn load_index(&self) -> Result<Option<usize>, IndexStoreError> {
        self.as_ref().load_index().await
    }

    async fn clear_index(&self) -> Result<(), IndexStoreError> {
        self.as_ref().clear_index().await
    }
}
