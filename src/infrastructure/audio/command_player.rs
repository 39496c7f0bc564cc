//! External command audio player adapter
//!
//! Playback is delegated to a platform audio utility. The child is spawned
//! with null stdio and never awaited, so a slow or hung player cannot block
//! the hook; it simply outlives this process.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{PlaybackError, SoundPlayer};

use super::installer::ensure_linux_player;
use super::platform::{afplay_args, detect_linux_player, Platform, LINUX_INSTALL_HINT};

/// macOS built-in player
const AFPLAY: &str = "afplay";

/// Plays sounds by launching `afplay` on macOS or the first available
/// player on Linux.
pub struct CommandPlayer {
    platform: Platform,
    auto_install: bool,
}

impl CommandPlayer {
    /// Create a player for the detected platform
    pub fn new() -> Self {
        Self {
            platform: Platform::detect(),
            auto_install: true,
        }
    }

    /// Create a player for an explicit platform
    pub fn with_platform(platform: Platform) -> Self {
        Self {
            platform,
            auto_install: true,
        }
    }

    /// Disable package-manager installs in `ensure_available`
    pub fn without_auto_install(mut self) -> Self {
        self.auto_install = false;
        self
    }

    fn spawn(program: &str, args: &[String]) -> Result<(), PlaybackError> {
        debug!(program, ?args, "launching player");
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| PlaybackError::SpawnFailed {
                player: program.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for CommandPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SoundPlayer for CommandPlayer {
    async fn play(&self, path: &Path, volume: f64) -> Result<(), PlaybackError> {
        if path.as_os_str().is_empty() {
            return Err(PlaybackError::EmptyPath);
        }
        if !path.exists() {
            return Err(PlaybackError::NotFound(path.display().to_string()));
        }

        match self.platform {
            Platform::MacOs => Self::spawn(AFPLAY, &afplay_args(path, volume)),
            Platform::Linux => {
                let player =
                    detect_linux_player().ok_or(PlaybackError::NoPlayerFound(LINUX_INSTALL_HINT))?;
                Self::spawn(player.executable(), &player.args(path, volume))
            }
            Platform::Unknown => Err(PlaybackError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            )),
        }
    }

    async fn ensure_available(&self) -> Result<String, PlaybackError> {
        match self.platform {
            Platform::MacOs => Ok(AFPLAY.to_string()),
            Platform::Linux => {
                let player = if self.auto_install {
                    ensure_linux_player().await
                } else {
                    detect_linux_player()
                };
                player
                    .map(|p| p.executable().to_string())
                    .ok_or(PlaybackError::NoPlayerFound(LINUX_INSTALL_HINT))
            }
            Platform::Unknown => Err(PlaybackError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            )),
        }
    }

    fn platform_name(&self) -> &'static str {
        self.platform.as_str()
    }
}
