//! Poll interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::IntervalParseError;

/// Default watcher poll interval (1 second)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Value object representing the watcher's polling interval.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollInterval {
    milliseconds: u64,
}

impl PollInterval {
    /// Create an interval from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create an interval from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default poll interval (1 second)
    pub const fn default_interval() -> Self {
        Self::from_millis(DEFAULT_POLL_INTERVAL_MS)
    }

    /// Get interval in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::default_interval()
    }
}

impl FromStr for PollInterval {
    type Err = IntervalParseError;

    /// Parse an interval string.
    /// Supported formats: "1s", "2s", "500ms", "1500ms"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();

        let parsed = if let Some(digits) = input.strip_suffix("ms") {
            digits.parse::<u64>().ok().map(Self::from_millis)
        } else if let Some(digits) = input.strip_suffix('s') {
            digits.parse::<u64>().ok().map(Self::from_secs)
        } else {
            None
        };

        match parsed {
            Some(interval) if interval.milliseconds > 0 => Ok(interval),
            _ => Err(IntervalParseError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PollInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milliseconds % 1000 == 0 {
            write!(f, "{}s", self.milliseconds / 1000)
        } else {
            write!(f, "{}ms", self.milliseconds)
        }
    }
}
