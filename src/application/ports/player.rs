//! Audio playback port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no sound path specified")]
    EmptyPath,

    #[error("sound file not found: {0}")]
    NotFound(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("no audio player found; install {0}")]
    NoPlayerFound(&'static str),

    #[error("failed to start {player}: {message}")]
    SpawnFailed { player: String, message: String },
}

/// Port for fire-and-forget sound playback
#[async_trait]
pub trait SoundPlayer: Send + Sync {
    /// Start playing a file at `volume` (0.0-1.0) and return without waiting
    /// for playback to finish.
    async fn play(&self, path: &Path, volume: f64) -> Result<(), PlaybackError>;

    /// Make sure some player executable is usable, installing one if the
    /// platform supports it. Returns the player name.
    async fn ensure_available(&self) -> Result<String, PlaybackError>;

    /// Name of the detected platform, for diagnostics
    fn platform_name(&self) -> &'static str;
}
