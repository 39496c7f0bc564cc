//! ccbell - sound notifications for Claude Code hook events
//!
//! A short-lived process started by the hook runner. It reads the user's
//! JSON config, applies the enable flags, quiet hours and per-event
//! cooldowns, resolves a sound reference to a file and hands it to a
//! platform audio player without waiting for playback to finish.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Events, config model, quiet hours, sound references and errors
//! - **Application**: The notify use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (JSON config, cooldown state file,
//!   sound resolver, command-line players, debug log)
//! - **CLI**: Argument parsing, output formatting and the main runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
