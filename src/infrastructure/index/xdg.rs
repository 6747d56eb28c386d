//! XDG browse-index store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::application::ports::{IndexStore, IndexStoreError};

#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    index: usize,
}

/// Persists the browsing position as a small JSON file under the
/// XDG state directory (the index is runtime state, not configuration).
pub struct XdgIndexStore {
    path: PathBuf,
}

impl XdgIndexStore {
    pub fn new() -> Self {
        // state_dir is unset on some platforms; data_dir is the next
        // best per-user writable location
        let state_dir = dirs::state_dir()
            .or_else(dirs::data_dir)
            .unwrap_or_else(|| PathBuf::from("~/.local/state"))
            .join("clipstack");

        Self {
            path: state_dir.join("browse_index.json"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for XdgIndexStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexStore for XdgIndexStore {
    async fn save_index(&self, index: usize) -> Result<(), IndexStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| IndexStoreError::WriteFailed(e.to_string()))?;
        }

        let content = serde_json::to_string(&PersistedIndex { index })
            .map_err(|e| IndexStoreError::WriteFailed(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| IndexStoreError::WriteFailed(e.to_string()))
    }

    async fn load_index(&self) -> Result<Option<usize>, IndexStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| IndexStoreError::ReadFailed(e.to_string()))?;

        // A corrupted file is treated as no saved position
        match serde_json::from_str::<PersistedIndex>(&content) {
            Ok(persisted) => Ok(Some(persisted.index)),
            Err(_) => Ok(None),
        }
    }

    async fn clear_index(&self) -> Result<(), IndexStoreError> {
        if !self.path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.path)
            .await
            .map_err(|e| IndexStoreError::WriteFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_path_lives_under_per_user_state() {
        let store = XdgIndexStore::new();
        let path = store.path.to_string_lossy();
        assert!(path.contains("clipstack"));
        assert!(store.path.ends_with("browse_index.json"));
        // Where the platform distinguishes state from config, the index
        // must not land next to config.toml
        if dirs::state_dir().is_some() {
            if let Some(config_dir) = dirs::config_dir() {
                assert!(!store.path.starts_with(config_dir));
            }
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = XdgIndexStore::with_path(dir.path().join("browse_index.json"));

        store.save_index(7).await.unwrap();
        assert_eq!(store.load_index().await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = XdgIndexStore::with_path(dir.path().join("browse_index.json"));
        assert_eq!(store.load_index().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupted_file_loads_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("browse_index.json");
        fs::write(&path, "{not json").await.unwrap();

        let store = XdgIndexStore::with_path(path);
        assert_eq!(store.load_index().await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_removes_the_file_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = XdgIndexStore::with_path(dir.path().join("browse_index.json"));

        store.save_index(3).await.unwrap();
        store.clear_index().await.unwrap();
        assert_eq!(store.load_index().await.unwrap(), None);
        store.clear_index().await.unwrap();
    }
}
