//! Sound resolution port interface

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::error::SoundSpecError;
use crate::domain::event::EventType;

/// Sound resolution errors
#[derive(Debug, Error)]
pub enum SoundResolveError {
    #[error(transparent)]
    InvalidSpec(#[from] SoundSpecError),

    #[error("bundled sound not found: {0}")]
    BundledNotFound(String),

    #[error("custom sound not accessible: {0}")]
    CustomNotAccessible(String),

    #[error("pack sound not found: pack={pack_id}, sound={file}")]
    PackNotFound { pack_id: String, file: String },

    #[error("home directory not set for pack sounds")]
    NoPacksDir,
}

/// Port for mapping a sound spec to a playable file
pub trait SoundResolver: Send + Sync {
    /// Resolve a sound spec (empty means the event's bundled sound) to an
    /// existing absolute path.
    fn resolve(&self, spec: &str, event: EventType) -> Result<PathBuf, SoundResolveError>;

    /// Event's bundled sound, else the bundled `stop` sound, else nothing.
    fn fallback(&self, event: EventType) -> Option<PathBuf>;
}
