//! Per-user file locations
//!
//! Computed once at startup from the environment and passed down to the
//! adapters that need them.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::CONFIG_FILE_NAME;
use super::state::STATE_FILE_NAME;

/// Environment variable naming the plugin installation directory
pub const PLUGIN_ROOT_ENV: &str = "CLAUDE_PLUGIN_ROOT";

const CLAUDE_DIR: &str = ".claude";
const LOG_FILE_NAME: &str = "ccbell.log";
const PLUGIN_DIR_NAME: &str = "ccbell";

/// Resolved locations for config, state, log, packs and bundled sounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// `None` when no home directory could be determined
    pub home: Option<PathBuf>,
    /// `None` when the plugin installation could not be located
    pub plugin_root: Option<PathBuf>,
}

impl AppPaths {
    /// Build paths from `HOME` and `CLAUDE_PLUGIN_ROOT`.
    ///
    /// A relative plugin root is ignored, since the hook's working directory
    /// is arbitrary.
    pub fn from_env() -> Self {
        let home = env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir);

        let plugin_root = env::var_os(PLUGIN_ROOT_ENV)
            .map(PathBuf::from)
            .filter(|r| r.is_absolute())
            .or_else(|| home.as_deref().and_then(find_plugin_root));

        Self { home, plugin_root }
    }

    /// Build paths from explicit directories
    pub fn new(home: Option<PathBuf>, plugin_root: Option<PathBuf>) -> Self {
        Self { home, plugin_root }
    }

    fn claude_dir(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|h| h.join(CLAUDE_DIR))
    }

    /// `~/.claude/ccbell.config.json`
    pub fn config_file(&self) -> Option<PathBuf> {
        self.claude_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// `~/.claude/ccbell.state`
    pub fn state_file(&self) -> Option<PathBuf> {
        self.claude_dir().map(|d| d.join(STATE_FILE_NAME))
    }

    /// `~/.claude/ccbell.log`
    pub fn log_file(&self) -> Option<PathBuf> {
        self.claude_dir().map(|d| d.join(LOG_FILE_NAME))
    }

    /// `~/.claude/ccbell/packs`
    pub fn packs_dir(&self) -> Option<PathBuf> {
        self.claude_dir()
            .map(|d| d.join(PLUGIN_DIR_NAME).join("packs"))
    }
}

/// Locate an installed plugin under `~/.claude/plugins/cache`.
///
/// Any marketplace layout is accepted: the first directory named `ccbell`
/// (depth-first, sorted) wins, then its lexically greatest version-like child
/// (`v…` or digit-leading) if there is one.
pub fn find_plugin_root(home: &Path) -> Option<PathBuf> {
    let cache_dir = home.join(CLAUDE_DIR).join("plugins").join("cache");
    let plugin_dir = find_dir_named(&cache_dir, PLUGIN_DIR_NAME)?;

    let latest = sorted_subdirs(&plugin_dir)
        .into_iter()
        .filter(|dir| {
            dir.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_version_like)
        })
        .max_by(|a, b| a.file_name().cmp(&b.file_name()));

    Some(latest.unwrap_or(plugin_dir))
}

fn is_version_like(name: &str) -> bool {
    name.starts_with('v') || name.starts_with(|c: char| c.is_ascii_digit())
}

fn find_dir_named(root: &Path, name: &str) -> Option<PathBuf> {
    for dir in sorted_subdirs(root) {
        if dir.file_name().is_some_and(|n| n == name) {
            return Some(dir);
        }
        if let Some(found) = find_dir_named(&dir, name) {
            return Some(found);
        }
    }
    None
}

/// Real (non-symlink) subdirectories, sorted by name. Unreadable entries are skipped.
fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .map(|e| e.path())
        .collect();
    dirs.sort();
    dirs
}
