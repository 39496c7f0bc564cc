//! Sound specification value object
//!
//! A sound spec is a tagged string: `bundled:<name>`, `custom:<path>`,
//! `pack:<pack_id>:<file>`, or a bare path. Parsing validates the shape only;
//! whether the file exists is decided by the resolver.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::domain::error::SoundSpecError;
use crate::domain::event::{is_identifier, EventType};

const BUNDLED_PREFIX: &str = "bundled:";
const CUSTOM_PREFIX: &str = "custom:";
const PACK_PREFIX: &str = "pack:";

/// Parsed, shape-validated sound specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSpec {
    /// Sound shipped in the plugin's `sounds/` directory
    Bundled(String),
    /// Absolute path supplied by the user (`custom:` or bare)
    Custom(PathBuf),
    /// File inside an installed sound pack
    Pack { pack_id: String, file: String },
}

impl SoundSpec {
    /// Parse a spec, defaulting an empty one to the event's bundled sound
    pub fn for_event(spec: &str, event: EventType) -> Result<Self, SoundSpecError> {
        if spec.is_empty() {
            return Ok(Self::Bundled(event.as_str().to_string()));
        }
        spec.parse()
    }
}

impl FromStr for SoundSpec {
    type Err = SoundSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(BUNDLED_PREFIX) {
            if !is_identifier(name) {
                return Err(SoundSpecError::InvalidBundledName(name.to_string()));
            }
            return Ok(Self::Bundled(name.to_string()));
        }

        if let Some(rest) = s.strip_prefix(PACK_PREFIX) {
            let (pack_id, file) = rest
                .split_once(':')
                .ok_or_else(|| SoundSpecError::InvalidPackFormat(rest.to_string()))?;
            if !is_identifier(pack_id) {
                return Err(SoundSpecError::InvalidPackId(pack_id.to_string()));
            }
            if file.is_empty() || file.contains("..") || file.contains('/') || file.contains('\\') {
                return Err(SoundSpecError::InvalidPackFile(file.to_string()));
            }
            return Ok(Self::Pack {
                pack_id: pack_id.to_string(),
                file: file.to_string(),
            });
        }

        let path = s.strip_prefix(CUSTOM_PREFIX).unwrap_or(s);
        validate_user_path(path).map(Self::Custom)
    }
}

/// A user-supplied path must be absolute and free of `..` segments
fn validate_user_path(path: &str) -> Result<PathBuf, SoundSpecError> {
    let path_ref = Path::new(path);
    if !path_ref.is_absolute() {
        return Err(SoundSpecError::NotAbsolute(path.to_string()));
    }
    if path.contains("..")
        || path_ref
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(SoundSpecError::PathTraversal);
    }
    Ok(path_ref.to_path_buf())
}
