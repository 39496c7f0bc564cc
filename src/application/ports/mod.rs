//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod cooldown;
pub mod player;
pub mod sound;

// Re-export common types
pub use config::{ConfigStore, LoadedConfig};
pub use cooldown::{CooldownError, CooldownStore};
pub use player::{PlaybackError, SoundPlayer};
pub use sound::{SoundResolveError, SoundResolver};
