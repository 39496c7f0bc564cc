//! Best-effort audio player installation on Linux

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::platform::{detect_linux_player, LinuxPlayer, LINUX_PLAYERS};

/// System package managers, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    AptGet,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    Apk,
}

const PACKAGE_MANAGERS: &[PackageManager] = &[
    PackageManager::AptGet,
    PackageManager::Dnf,
    PackageManager::Yum,
    PackageManager::Pacman,
    PackageManager::Zypper,
    PackageManager::Apk,
];

impl PackageManager {
    pub const fn executable(&self) -> &'static str {
        match self {
            PackageManager::AptGet => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
            PackageManager::Apk => "apk",
        }
    }

    /// Arguments after the executable for a non-interactive install
    pub fn install_args(&self, package: &str) -> Vec<String> {
        let base: &[&str] = match self {
            PackageManager::AptGet => &["install", "-y"],
            PackageManager::Dnf | PackageManager::Yum => &["install", "-y"],
            PackageManager::Pacman => &["-S", "--noconfirm"],
            PackageManager::Zypper => &["--non-interactive", "install"],
            PackageManager::Apk => &["add", "--no-cache"],
        };
        base.iter()
            .map(|s| s.to_string())
            .chain(std::iter::once(package.to_string()))
            .collect()
    }

    /// First package manager found on PATH
    pub fn detect() -> Option<Self> {
        PACKAGE_MANAGERS
            .iter()
            .copied()
            .find(|pm| which::which(pm.executable()).is_ok())
    }
}

/// Install a player's package through `sudo -n`, never prompting.
async fn install(pm: PackageManager, player: LinuxPlayer) -> bool {
    debug!(package_manager = pm.executable(), package = player.package(), "attempting player install");

    Command::new("sudo")
        .arg("-n")
        .arg(pm.executable())
        .args(pm.install_args(player.package()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Find a Linux player, installing one if none is present.
pub async fn ensure_linux_player() -> Option<LinuxPlayer> {
    if let Some(player) = detect_linux_player() {
        return Some(player);
    }

    let pm = PackageManager::detect()?;
    for player in LINUX_PLAYERS {
        if install(pm, *player).await && player.is_available() {
            return Some(*player);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_args_are_non_interactive() {
        assert_eq!(
            PackageManager::AptGet.install_args("mpv"),
            ["install", "-y", "mpv"]
        );
        assert_eq!(
            PackageManager::Pacman.install_args("alsa-utils"),
            ["-S", "--noconfirm", "alsa-utils"]
        );
        assert_eq!(
            PackageManager::Apk.install_args("ffmpeg"),
            ["add", "--no-cache", "ffmpeg"]
        );
        assert_eq!(
            PackageManager::Zypper.install_args("mpv"),
            ["--non-interactive", "install", "mpv"]
        );
    }
}
