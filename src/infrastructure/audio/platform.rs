//! Platform and player detection

use std::fmt;
use std::path::Path;

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Unknown,
}

impl Platform {
    /// Detect the platform this binary was built for
    pub const fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Unknown
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio player executables probed on Linux
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxPlayer {
    /// mpv media player
    Mpv,
    /// PulseAudio client
    Paplay,
    /// ALSA client
    Aplay,
    /// FFmpeg's player
    Ffplay,
}

/// Linux players in priority order
pub const LINUX_PLAYERS: &[LinuxPlayer] = &[
    LinuxPlayer::Mpv,
    LinuxPlayer::Paplay,
    LinuxPlayer::Aplay,
    LinuxPlayer::Ffplay,
];

/// Shown when no Linux player can be found or installed
pub const LINUX_INSTALL_HINT: &str = "mpv, ffmpeg, pulseaudio-utils, or alsa-utils";

impl LinuxPlayer {
    /// Executable name looked up on PATH
    pub const fn executable(&self) -> &'static str {
        match self {
            LinuxPlayer::Mpv => "mpv",
            LinuxPlayer::Paplay => "paplay",
            LinuxPlayer::Aplay => "aplay",
            LinuxPlayer::Ffplay => "ffplay",
        }
    }

    /// Distribution package providing the executable
    pub const fn package(&self) -> &'static str {
        match self {
            LinuxPlayer::Mpv => "mpv",
            LinuxPlayer::Paplay => "pulseaudio-utils",
            LinuxPlayer::Aplay => "alsa-utils",
            LinuxPlayer::Ffplay => "ffmpeg",
        }
    }

    /// Command-line arguments. Volume is passed as an integer percent to
    /// players that accept one; paplay and aplay play at system volume.
    pub fn args(&self, path: &Path, volume: f64) -> Vec<String> {
        let percent = volume_percent(volume);
        let path = path.to_string_lossy().into_owned();
        match self {
            LinuxPlayer::Mpv => vec![
                "--really-quiet".to_string(),
                format!("--volume={percent}"),
                path,
            ],
            LinuxPlayer::Paplay => vec![path],
            LinuxPlayer::Aplay => vec!["-q".to_string(), path],
            LinuxPlayer::Ffplay => vec![
                "-nodisp".to_string(),
                "-autoexit".to_string(),
                "-volume".to_string(),
                percent.to_string(),
                path,
            ],
        }
    }

    /// Check whether the executable is on PATH
    pub fn is_available(&self) -> bool {
        which::which(self.executable()).is_ok()
    }
}

impl fmt::Display for LinuxPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// First available Linux player in priority order
pub fn detect_linux_player() -> Option<LinuxPlayer> {
    LINUX_PLAYERS.iter().copied().find(LinuxPlayer::is_available)
}

/// Volume (0.0-1.0) as a truncated integer percent
pub fn volume_percent(volume: f64) -> u32 {
    (volume.clamp(0.0, 1.0) * 100.0) as u32
}

/// afplay's `-v` argument
pub fn afplay_args(path: &Path, volume: f64) -> Vec<String> {
    vec![
        "-v".to_string(),
        format!("{:.2}", volume.clamp(0.0, 1.0)),
        path.to_string_lossy().into_owned(),
    ]
}
