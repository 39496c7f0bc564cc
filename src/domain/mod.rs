//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod event;
pub mod sound;

// Re-export common types
pub use config::{AppConfig, EventSettings, QuietHours};
pub use error::*;
pub use event::{EventType, ALL_EVENTS};
pub use sound::SoundSpec;
