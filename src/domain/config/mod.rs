//! Configuration value objects

pub mod app_config;
pub mod poll_interval;

pub use app_config::{AppConfig, DEFAULT_MAX_TEXT_PREVIEW};
pub use poll_interval::{PollInterval, DEFAULT_POLL_INTERVAL_MS};
