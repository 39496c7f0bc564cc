//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the filesystem and external audio players.

pub mod audio;
pub mod config;
pub mod logging;
pub mod paths;
pub mod state;

// Re-export adapters
pub use audio::{CommandPlayer, FsSoundResolver};
pub use config::JsonConfigStore;
pub use paths::AppPaths;
pub use state::FileCooldownStore;
