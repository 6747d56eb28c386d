//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland). arboard exposes no
//! NSPasteboard-style change counter, so this adapter synthesizes one: it
//! fingerprints the current content and bumps a monotonic counter when
//! the fingerprint changes. A same-content re-copy is invisible, which
//! matches the observe-distinct-content contract of the port.

use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::application::ports::{ClipboardError, SystemClipboard};
use crate::domain::classify::{tag, RawClipboardItem};
use crate::domain::snapshot::{ClipboardPayload, ImageEncoding};

#[derive(Debug, Default)]
struct CounterState {
    counter: u64,
    fingerprint: Option<u64>,
}

/// Cross-platform clipboard adapter using arboard
pub struct ArboardClipboard {
    state: Arc<Mutex<CounterState>>,
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CounterState::default())),
        }
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn open() -> Result<arboard::Clipboard, ClipboardError> {
    arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

fn join_error(e: tokio::task::JoinError) -> ClipboardError {
    ClipboardError::ReadFailed(format!("Task join error: {}", e))
}

/// Hash whatever the clipboard currently offers. Text and image content
/// both feed the fingerprint; an empty clipboard hashes to a stable
/// sentinel.
fn fingerprint(clipboard: &mut arboard::Clipboard) -> u64 {
    let mut hasher = DefaultHasher::new();
    match clipboard.get_text() {
        Ok(text) => {
            1u8.hash(&mut hasher);
            text.hash(&mut hasher);
        }
        Err(_) => 0u8.hash(&mut hasher),
    }
    match clipboard.get_image() {
        Ok(img) => {
            1u8.hash(&mut hasher);
            img.width.hash(&mut hasher);
            img.height.hash(&mut hasher);
            img.bytes.hash(&mut hasher);
        }
        Err(_) => 0u8.hash(&mut hasher),
    }
    hasher.finish()
}

#[async_trait]
impl SystemClipboard for ArboardClipboard {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        let state = Arc::clone(&self.state);

        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut clipboard = open()?;
            let current = fingerprint(&mut clipboard);
            let mut guard = state.lock().unwrap_or_else(|e| e.into_inner());
            if guard.fingerprint != Some(current) {
                guard.fingerprint = Some(current);
                guard.counter += 1;
            }
            Ok(guard.counter)
        })
        .await
        .map_err(join_error)?
    }

    async fn read_items(&self) -> Result<Vec<RawClipboardItem>, ClipboardError> {
        tokio::task::spawn_blocking(move || {
            let mut clipboard = open()?;
            let mut item = RawClipboardItem::new();

            if let Ok(text) = clipboard.get_text() {
                item.push_text(tag::TEXT, text);
            }

            if let Ok(img) = clipboard.get_image() {
                if let Some(png) = encode_png(img.width, img.height, img.bytes.into_owned()) {
                    item.push_bytes(ImageEncoding::Png.tag(), png);
                }
            }

            // arboard models the clipboard as one logical item
            if item.is_empty() {
                Ok(vec![])
            } else {
                Ok(vec![item])
            }
        })
        .await
        .map_err(join_error)?
    }

    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardError> {
        let payload = payload.clone();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = open()?;
            match payload {
                ClipboardPayload::Text(text) => clipboard
                    .set_text(text)
                    .map_err(|e| ClipboardError::WriteRejected(e.to_string())),
                ClipboardPayload::Image { bytes, .. } => {
                    let decoded = image::load_from_memory(&bytes)
                        .map_err(|e| ClipboardError::WriteRejected(e.to_string()))?
                        .into_rgba8();
                    let (width, height) = decoded.dimensions();
                    clipboard
                        .set_image(arboard::ImageData {
                            width: width as usize,
                            height: height as usize,
                            bytes: Cow::Owned(decoded.into_raw()),
                        })
                        .map_err(|e| ClipboardError::WriteRejected(e.to_string()))
                }
                // No portable way to place a native file list; the path
                // as text is the representation downstream apps can use
                ClipboardPayload::FileReference(path) => clipboard
                    .set_text(path.display().to_string())
                    .map_err(|e| ClipboardError::WriteRejected(e.to_string())),
                ClipboardPayload::Unknown { bytes, .. } => match String::from_utf8(bytes) {
                    Ok(text) => clipboard
                        .set_text(text)
                        .map_err(|e| ClipboardError::WriteRejected(e.to_string())),
                    Err(_) => Err(ClipboardError::WriteRejected(
                        "unknown payload has no system representation".into(),
                    )),
                },
            }
        })
        .await
        .map_err(join_error)?
    }
}

/// Encode raw RGBA pixels as PNG bytes. Returns None when the buffer
/// does not match the stated dimensions.
fn encode_png(width: usize, height: usize, rgba: Vec<u8>) -> Option<Vec<u8>> {
    let buffer = RgbaImage::from_raw(width as u32, height as u32, rgba)?;
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut out, ImageFormat::Png)
        .ok()?;
    Some(out.into_inner())
}
