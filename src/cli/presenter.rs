//! CLI presenter for output formatting
//!
//! Hooks run without a terminal most of the time, so everything except the
//! version and help text goes to stderr with a short `ccbell:` prefix.

use colored::*;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "ccbell: warning:".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "ccbell: error:".red(), message);
    }

    /// Print an unexpected internal fault to stderr
    pub fn internal_error(&self, message: &str) {
        eprintln!("{} {}", "ccbell: internal error:".red().bold(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
