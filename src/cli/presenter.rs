//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (committed payload summaries land here)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Format a browse position line: `[3/20] preview text`
    pub fn format_browse_line(&self, index: usize, len: usize, preview: &str) -> String {
        format!(
            "{} {}",
            format!("[{}/{}]", index + 1, len).cyan(),
            preview
        )
    }

    /// Show the current browse position on stderr
    pub fn browse_position(&self, index: usize, len: usize, preview: &str) {
        eprintln!("{}", self.format_browse_line(index, len, preview));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_line_is_one_based() {
        let presenter = Presenter::new();
        let line = presenter.format_browse_line(0, 20, "hello");
        assert!(line.contains("1/20"));
        assert!(line.contains("hello"));
    }

    #[test]
    fn browse_line_at_tail() {
        let presenter = Presenter::new();
        let line = presenter.format_browse_line(19, 20, "oldest");
        assert!(line.contains("20/20"));
    }
}
