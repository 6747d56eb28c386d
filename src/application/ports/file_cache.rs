//! File-content cache port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Cache errors. Per-file and non-fatal: a failed read renders as an
/// "unreadable" placeholder and never blocks navigation.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Failed to read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Port for lazily resolving preview text for file references.
///
/// Reads happen off the serialized engine context; results come back
/// through the returned future. Invalidation is synchronous so it can run
/// inside a store-event observer.
#[async_trait]
pub trait FileContentCache: Send + Sync {
    /// Resolve preview text for a file, reading and memoizing on first
    /// use.
    ///
    /// # Returns
    /// `Ok(Some(text))` for readable UTF-8 content, `Ok(None)` for
    /// content that is not text, `Err` if the file cannot be read.
    async fn request_text(&self, path: &Path) -> Result<Option<String>, CacheError>;

    /// Drop any cached content for `path`
    fn invalidate(&self, path: &Path);

    /// Drop all cached content
    fn invalidate_all(&self);
}
