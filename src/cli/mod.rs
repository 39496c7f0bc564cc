//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the stdin drain,
//! and the main application runner.

pub mod app;
pub mod args;
pub mod presenter;
pub mod stdin;

// Re-export commonly used types
pub use app::{run, run_notify, EXIT_ERROR, EXIT_INTERNAL_ERROR, EXIT_SUCCESS};
pub use args::{version_line, Cli, DEFAULT_EVENT};
pub use presenter::Presenter;
