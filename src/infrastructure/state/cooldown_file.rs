//! Cooldown state file adapter
//!
//! State is a small JSON document `{"lastTrigger": {"<event>": <unix secs>}}`.
//! Writes go to a temp file in the same directory that is renamed into place,
//! so readers never see a partial document. Concurrent invocations race with
//! last-writer-wins.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::{CooldownError, CooldownStore};
use crate::domain::event::EventType;

/// State file name under `~/.claude`
pub const STATE_FILE_NAME: &str = "ccbell.state";

/// Persisted last-fire timestamps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownState {
    #[serde(rename = "lastTrigger", default)]
    pub last_trigger: BTreeMap<String, i64>,
}

/// File-backed cooldown store
pub struct FileCooldownStore {
    /// `None` disables cooldown tracking entirely
    path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl FileCooldownStore {
    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            lock: Mutex::new(()),
        }
    }

    /// Create a store that never throttles (no home directory)
    pub fn disabled() -> Self {
        Self {
            path: None,
            lock: Mutex::new(()),
        }
    }

    /// Get the state file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Cooldown check against an explicit clock reading
    pub async fn check_cooldown_at(
        &self,
        event: EventType,
        cooldown_secs: u64,
        now: i64,
    ) -> Result<bool, CooldownError> {
        let Some(ref path) = self.path else {
            return Ok(false);
        };
        if cooldown_secs == 0 {
            return Ok(false);
        }

        let _guard = self.lock.lock().await;

        let mut state = load_state(path).await;
        let last = state.last_trigger.get(event.as_str()).copied().unwrap_or(0);
        let elapsed = now.saturating_sub(last);

        if elapsed < i64::try_from(cooldown_secs).unwrap_or(i64::MAX) {
            return Ok(true);
        }

        state.last_trigger.insert(event.as_str().to_string(), now);

        let path = path.clone();
        tokio::task::spawn_blocking(move || save_state(&path, &state))
            .await
            .map_err(|e| CooldownError::SaveFailed(format!("task join error: {e}")))??;

        Ok(false)
    }
}

#[async_trait]
impl CooldownStore for FileCooldownStore {
    async fn check_cooldown(
        &self,
        event: EventType,
        cooldown_secs: u64,
    ) -> Result<bool, CooldownError> {
        self.check_cooldown_at(event, cooldown_secs, unix_now()).await
    }

    async fn clear(&self) -> Result<(), CooldownError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        let _guard = self.lock.lock().await;

        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CooldownError::ClearFailed(e.to_string())),
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Read the state file. Missing or corrupted files read as empty state.
async fn load_state(path: &Path) -> CooldownState {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                debug!(error = %e, "unreadable state file, starting fresh");
            }
            return CooldownState::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        debug!(error = %e, "corrupted state file, starting fresh");
        CooldownState::default()
    })
}

/// Write the state file atomically: temp file in the same directory, then rename.
/// The temp file is removed on every error path when it is dropped.
fn save_state(path: &Path, state: &CooldownState) -> Result<(), CooldownError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(dir)
        .map_err(|e| CooldownError::SaveFailed(format!("failed to create state directory: {e}")))?;

    let mut data = serde_json::to_vec_pretty(state)
        .map_err(|e| CooldownError::SaveFailed(e.to_string()))?;
    data.push(b'\n');

    let mut temp = tempfile::Builder::new()
        .prefix("ccbell.state.")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| CooldownError::SaveFailed(format!("failed to create temp file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(|e| {
                CooldownError::SaveFailed(format!("failed to set temp file permissions: {e}"))
            })?;
    }

    temp.write_all(&data)
        .map_err(|e| CooldownError::SaveFailed(format!("failed to write temp file: {e}")))?;

    temp.persist(path)
        .map_err(|e| CooldownError::SaveFailed(format!("failed to rename temp file: {}", e.error)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileCooldownStore {
        FileCooldownStore::with_path(dir.path().join(STATE_FILE_NAME))
    }

    fn read_state(store: &FileCooldownStore) -> CooldownState {
        let content = std::fs::read_to_string(store.path().unwrap()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn first_fire_is_not_throttled_then_second_is() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.check_cooldown(EventType::Stop, 60).await.unwrap());
        assert!(store.check_cooldown(EventType::Stop, 60).await.unwrap());
    }

    #[tokio::test]
    async fn zero_cooldown_never_throttles_or_writes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for _ in 0..3 {
            assert!(!store.check_cooldown(EventType::Stop, 0).await.unwrap());
        }
        assert!(!store.path().unwrap().exists());
    }

    #[tokio::test]
    async fn zero_cooldown_ignores_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.check_cooldown(EventType::Stop, 60).await.unwrap();
        assert!(!store.check_cooldown(EventType::Stop, 0).await.unwrap());
    }

    #[tokio::test]
    async fn events_are_tracked_independently() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.check_cooldown(EventType::Stop, 60).await.unwrap());
        assert!(!store.check_cooldown(EventType::Subagent, 60).await.unwrap());
        assert!(store.check_cooldown(EventType::Stop, 60).await.unwrap());
    }

    #[tokio::test]
    async fn cooldown_expires() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.check_cooldown_at(EventType::IdlePrompt, 30, 1_000).await.unwrap());
        assert!(store.check_cooldown_at(EventType::IdlePrompt, 30, 1_029).await.unwrap());
        assert!(!store.check_cooldown_at(EventType::IdlePrompt, 30, 1_030).await.unwrap());
        assert_eq!(read_state(&store).last_trigger["idle_prompt"], 1_030);
    }

    #[tokio::test]
    async fn throttled_check_does_not_touch_state() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.check_cooldown_at(EventType::Stop, 60, 5_000).await.unwrap();
        store.check_cooldown_at(EventType::Stop, 60, 5_010).await.unwrap();

        assert_eq!(read_state(&store).last_trigger["stop"], 5_000);
    }

    #[tokio::test]
    async fn corrupted_state_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path().unwrap(), "{garbage").unwrap();

        assert!(!store.check_cooldown(EventType::Stop, 60).await.unwrap());
        assert!(read_state(&store).last_trigger.contains_key("stop"));
    }

    #[tokio::test]
    async fn state_file_layout_and_permissions() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.check_cooldown_at(EventType::Stop, 5, 42).await.unwrap();

        let content = std::fs::read_to_string(store.path().unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["lastTrigger"]["stop"], 42);
        assert!(content.ends_with('\n'));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.path().unwrap())
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        // No temp files left behind
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileCooldownStore::with_path(dir.path().join("nested").join(STATE_FILE_NAME));

        assert!(!store.check_cooldown(EventType::Stop, 10).await.unwrap());
        assert!(store.path().unwrap().exists());
    }

    #[tokio::test]
    async fn clear_removes_state_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.clear().await.unwrap();
        store.check_cooldown(EventType::Stop, 60).await.unwrap();
        store.clear().await.unwrap();

        assert!(!store.path().unwrap().exists());
        assert!(!store.check_cooldown(EventType::Stop, 60).await.unwrap());
    }

    #[tokio::test]
    async fn disabled_store_never_throttles() {
        let store = FileCooldownStore::disabled();
        assert!(!store.check_cooldown(EventType::Stop, 60).await.unwrap());
        assert!(!store.check_cooldown(EventType::Stop, 60).await.unwrap());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn save_failure_is_reported_separately() {
        let dir = TempDir::new().unwrap();
        // Parent "directory" is a regular file, so the write must fail
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = FileCooldownStore::with_path(blocker.join(STATE_FILE_NAME));

        let err = store.check_cooldown(EventType::Stop, 60).await.unwrap_err();
        assert!(matches!(err, CooldownError::SaveFailed(_)));
    }
}
