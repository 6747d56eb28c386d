//! Notification infrastructure module
//!
//! Provides cross-platform notification support using notify-rust, with a
//! no-op adapter for when notifications are turned off.

mod noop;
mod notify_rust;

pub use noop::NoopNotifier;
pub use notify_rust::NotifyRustNotifier;

use crate::application::ports::Notifier;

/// Create the notifier matching the user's notification setting
pub fn create_notifier(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(NotifyRustNotifier::new())
    } else {
        Box::new(NoopNotifier)
    }
}
