//! Chunked file-content cache
//!
//! Resolves preview text for file references by reading only the leading
//! chunk of the file, memoized per path. Invalidation runs synchronously
//! so it can be driven from a history-store observer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::application::ports::{CacheError, FileContentCache};

/// How much of a file is read for preview (4 KiB)
const CHUNK_SIZE: usize = 4 * 1024;

/// File-content cache reading a leading chunk per path
#[derive(Clone, Default)]
pub struct ChunkFileCache {
    entries: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl ChunkFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn cached(&self, path: &Path) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    fn store(&self, path: &Path, text: String) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_path_buf(), text);
    }
}

/// Decode a chunk as UTF-8 text. A multi-byte character cut off at the
/// chunk boundary is not an encoding error; the valid prefix is kept.
/// Anything invalid mid-stream means the file is not text.
fn text_from_chunk(chunk: Vec<u8>) -> Option<String> {
    match String::from_utf8(chunk) {
        Ok(text) => Some(text),
        Err(err) => {
            let utf8_error = err.utf8_error();
            if utf8_error.error_len().is_none() {
                let valid = utf8_error.valid_up_to();
                let mut bytes = err.into_bytes();
                bytes.truncate(valid);
                String::from_utf8(bytes).ok()
            } else {
                None
            }
        }
    }
}

#[async_trait]
impl FileContentCache for ChunkFileCache {
    async fn request_text(&self, path: &Path) -> Result<Option<String>, CacheError> {
        if let Some(text) = self.cached(path) {
            return Ok(Some(text));
        }

        let mut file = tokio::fs::File::open(path).await.map_err(|e| {
            CacheError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut chunk = vec![0u8; CHUNK_SIZE];
        let mut filled = 0;
        loop {
            let read = file
                .read(&mut chunk[filled..])
                .await
                .map_err(|e| CacheError::Unreadable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            if read == 0 {
                break;
            }
            filled += read;
            if filled == chunk.len() {
                break;
            }
        }
        chunk.truncate(filled);

        match text_from_chunk(chunk) {
            Some(text) => {
                self.store(path, text.clone());
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn invalidate(&self, path: &Path) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path);
    }

    fn invalidate_all(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn reads_and_memoizes_text_files() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "first line").unwrap();

        let cache = ChunkFileCache::new();
        let text = cache.request_text(file.path()).await.unwrap().unwrap();
        assert!(text.starts_with("first line"));

        // Served from cache even after the file is gone
        let path = file.path().to_path_buf();
        drop(file);
        assert!(cache.request_text(&path).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn reads_only_the_leading_chunk() {
        let mut file = NamedTempFile::new().unwrap();
        let body = "x".repeat(CHUNK_SIZE * 3);
        write!(file, "{}", body).unwrap();

        let cache = ChunkFileCache::new();
        let text = cache.request_text(file.path()).await.unwrap().unwrap();
        assert_eq!(text.len(), CHUNK_SIZE);
    }

    #[tokio::test]
    async fn binary_content_yields_none() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x01]).unwrap();

        let cache = ChunkFileCache::new();
        assert!(cache.request_text(file.path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let cache = ChunkFileCache::new();
        let result = cache.request_text(Path::new("/nonexistent/nope.txt")).await;
        assert!(matches!(result, Err(CacheError::Unreadable { .. })));
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_read() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "before").unwrap();

        let cache = ChunkFileCache::new();
        assert_eq!(
            cache.request_text(file.path()).await.unwrap().as_deref(),
            Some("before")
        );

        let path = file.path().to_path_buf();
        drop(file);
        cache.invalidate(&path);
        assert!(cache.request_text(&path).await.is_err());
    }

    #[test]
    fn truncated_multibyte_tail_keeps_valid_prefix() {
        // "é" is two bytes; cut it in half
        let mut bytes = "abcé".as_bytes().to_vec();
        bytes.pop();
        assert_eq!(text_from_chunk(bytes).as_deref(), Some("abc"));
    }

    #[test]
    fn invalid_interior_bytes_are_not_text() {
        assert!(text_from_chunk(vec![b'a', 0xff, b'b']).is_none());
    }
}
