//! Filesystem sound resolver

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::ports::{SoundResolveError, SoundResolver};
use crate::domain::event::EventType;
use crate::domain::sound::SoundSpec;

/// Bundled sounds live in `<plugin root>/sounds/<name>.aiff`
const SOUNDS_DIR: &str = "sounds";
const BUNDLED_EXTENSION: &str = "aiff";

/// Resolves sound specs against the plugin's bundled sounds, user paths and
/// installed sound packs.
///
/// Without an absolute plugin root no bundled sound resolves.
pub struct FsSoundResolver {
    sounds_dir: Option<PathBuf>,
    packs_dir: Option<PathBuf>,
}

impl FsSoundResolver {
    pub fn new(plugin_root: Option<PathBuf>, packs_dir: Option<PathBuf>) -> Self {
        Self {
            sounds_dir: plugin_root
                .filter(|root| root.is_absolute())
                .map(|root| root.join(SOUNDS_DIR)),
            packs_dir,
        }
    }

    fn bundled_path(&self, name: &str) -> Option<PathBuf> {
        self.sounds_dir
            .as_ref()
            .map(|dir| dir.join(format!("{name}.{BUNDLED_EXTENSION}")))
    }

    /// Link-aware existence check for bundled sounds.
    ///
    /// A regular file is accepted as is. A symlink is accepted only when its
    /// target exists and stays inside the sounds directory, so a swapped
    /// link cannot point playback at an arbitrary file.
    fn bundled_exists(&self, path: &Path) -> bool {
        let Some(ref sounds_dir) = self.sounds_dir else {
            return false;
        };
        let Ok(meta) = fs::symlink_metadata(path) else {
            return false;
        };

        if !meta.file_type().is_symlink() {
            return true;
        }

        let (Ok(target), Ok(sounds_dir)) = (
            fs::canonicalize(path),
            fs::canonicalize(sounds_dir),
        ) else {
            return false;
        };
        target.starts_with(sounds_dir)
    }

    fn resolve_bundled(&self, name: &str) -> Result<PathBuf, SoundResolveError> {
        self.bundled_path(name)
            .filter(|path| self.bundled_exists(path))
            .ok_or_else(|| SoundResolveError::BundledNotFound(name.to_string()))
    }

    fn resolve_custom(&self, path: PathBuf) -> Result<PathBuf, SoundResolveError> {
        // The user named this file explicitly, so following links is fine
        if fs::metadata(&path).is_err() {
            return Err(SoundResolveError::CustomNotAccessible(
                path.display().to_string(),
            ));
        }
        Ok(path)
    }

    fn resolve_pack(&self, pack_id: String, file: String) -> Result<PathBuf, SoundResolveError> {
        let packs_dir = self.packs_dir.as_ref().ok_or(SoundResolveError::NoPacksDir)?;
        let path = packs_dir.join(&pack_id).join(&file);
        if fs::metadata(&path).is_err() {
            return Err(SoundResolveError::PackNotFound { pack_id, file });
        }
        Ok(path)
    }
}

impl SoundResolver for FsSoundResolver {
    fn resolve(&self, spec: &str, event: EventType) -> Result<PathBuf, SoundResolveError> {
        match SoundSpec::for_event(spec, event)? {
            SoundSpec::Bundled(name) => self.resolve_bundled(&name),
            SoundSpec::Custom(path) => self.resolve_custom(path),
            SoundSpec::Pack { pack_id, file } => self.resolve_pack(pack_id, file),
        }
    }

    fn fallback(&self, event: EventType) -> Option<PathBuf> {
        [event, EventType::Stop]
            .into_iter()
            .filter_map(|e| self.bundled_path(e.as_str()))
            .find(|path| self.bundled_exists(path))
    }
}
