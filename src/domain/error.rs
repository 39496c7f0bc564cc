//! Domain error types

use thiserror::Error;

/// Error when an event name is not one of the recognized hook events
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEventError {
    #[error("invalid event type format: must be lowercase letters and underscores only")]
    Format { input: String },

    #[error("unknown event type: {input} (valid: stop, permission_prompt, idle_prompt, subagent)")]
    Unknown { input: String },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("invalid JSON in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("config validation failed: {0}")]
    ValidationError(String),
}

/// Error when a sound specification is malformed or unsafe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoundSpecError {
    #[error("invalid bundled sound name: {0}")]
    InvalidBundledName(String),

    #[error("custom sound must be absolute path: {0}")]
    NotAbsolute(String),

    #[error("path traversal not allowed")]
    PathTraversal,

    #[error("invalid pack sound format: {0} (expected pack_id:sound_file)")]
    InvalidPackFormat(String),

    #[error("invalid pack ID: {0}")]
    InvalidPackId(String),

    #[error("invalid sound file name: {0}")]
    InvalidPackFile(String),
}
