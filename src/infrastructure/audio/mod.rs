//! Audio infrastructure adapters
//!
//! Sound spec resolution and playback through external player executables.

mod command_player;
mod installer;
mod platform;
mod resolver;

pub use command_player::CommandPlayer;
pub use installer::{ensure_linux_player, PackageManager};
pub use platform::{detect_linux_player, LinuxPlayer, Platform, LINUX_PLAYERS};
pub use resolver::FsSoundResolver;
