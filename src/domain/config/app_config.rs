//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::config::PollInterval;

/// Default cap on characters shown in a text preview line
pub const DEFAULT_MAX_TEXT_PREVIEW: usize = 280;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub poll_interval: Option<String>,
    pub notify: Option<bool>,
    pub cue: Option<bool>,
    pub max_text_preview: Option<usize>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            poll_interval: Some("1s".to_string()),
            notify: Some(false),
            cue: Some(true),
            max_text_preview: Some(DEFAULT_MAX_TEXT_PREVIEW),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            poll_interval: other.poll_interval.or(self.poll_interval),
            notify: other.notify.or(self.notify),
            cue: other.cue.or(self.cue),
            max_text_preview: other.max_text_preview.or(self.max_text_preview),
        }
    }

    /// Get poll interval as parsed PollInterval, or default if not set/invalid
    pub fn poll_interval_or_default(&self) -> PollInterval {
        self.poll_interval
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get boundary cue setting, or true if not set
    pub fn cue_or_default(&self) -> bool {
        self.cue.unwrap_or(true)
    }

    /// Get text preview cap, or the default if not set
    pub fn max_text_preview_or_default(&self) -> usize {
        self.max_text_preview.unwrap_or(DEFAULT_MAX_TEXT_PREVIEW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_field() {
        let config = AppConfig::defaults();
        assert_eq!(config.poll_interval_or_default(), PollInterval::from_secs(1));
        assert!(!config.notify_or_default());
        assert!(config.cue_or_default());
        assert_eq!(config.max_text_preview_or_default(), DEFAULT_MAX_TEXT_PREVIEW);
    }

    #[test]
    fn merge_prefers_other_side() {
        let base = AppConfig {
            poll_interval: Some("1s".into()),
            notify: Some(false),
            cue: Some(true),
            max_text_preview: Some(100),
        };
        let overlay = AppConfig {
            poll_interval: Some("500ms".into()),
            notify: None,
            cue: Some(false),
            max_text_preview: None,
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.poll_interval.as_deref(), Some("500ms"));
        assert_eq!(merged.notify, Some(false));
        assert_eq!(merged.cue, Some(false));
        assert_eq!(merged.max_text_preview, Some(100));
    }

    #[test]
    fn invalid_interval_string_falls_back_to_default() {
        let config = AppConfig {
            poll_interval: Some("yesterday".into()),
            ..AppConfig::empty()
        };
        assert_eq!(config.poll_interval_or_default(), PollInterval::default());
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::defaults();
        let text = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.poll_interval.as_deref(), Some("1s"));
        assert_eq!(parsed.cue, Some(true));
    }
}
