//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::config::PollInterval;

/// ClipStack - clipboard history daemon
#[derive(Parser, Debug)]
#[command(name = "clipstack")]
#[command(version = "0.1.0")]
#[command(about = "Clipboard history daemon with browse-and-paste selection")]
#[command(long_about = None)]
pub struct Cli {
    /// Clipboard poll interval (e.g., 1s, 500ms)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub interval: Option<String>,

    /// Show desktop notifications on paste failures
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Disable the boundary/commit audio cue
    #[arg(short = 's', long)]
    pub silent: bool,

    /// Max characters shown per preview line
    #[arg(long, value_name = "CHARS")]
    pub max_preview: Option<usize>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed daemon options after config merge
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub poll_interval: PollInterval,
    pub notify: bool,
    pub cue: bool,
    pub max_text_preview: usize,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["poll_interval", "notify", "cue", "max_text_preview"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
