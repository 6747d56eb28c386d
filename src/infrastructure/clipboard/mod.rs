//! Clipboard infrastructure module
//!
//! Cross-platform system clipboard access using arboard.

mod arboard;

pub use arboard::ArboardClipboard;

use crate::application::ports::SystemClipboard;

/// Create the default clipboard adapter for the current platform
pub fn create_clipboard() -> Box<dyn SystemClipboard> {
    Box::new(ArboardClipboard::new())
}
