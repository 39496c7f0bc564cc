//! JSON config store adapter

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{ConfigStore, LoadedConfig};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Config file name under `~/.claude`
pub const CONFIG_FILE_NAME: &str = "ccbell.config.json";

/// Config store backed by a single JSON document
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse and validate JSON content
    fn parse_json(&self, content: &str) -> Result<AppConfig, ConfigError> {
        let config = AppConfig::from_json(content, &self.path.to_string_lossy())?;
        config.validate()?;
        Ok(config)
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(LoadedConfig {
                    config: AppConfig::defaults(),
                    source: None,
                });
            }
            Err(e) => return Err(ConfigError::ReadError(e.to_string())),
        };

        Ok(LoadedConfig {
            config: self.parse_json(&content)?,
            source: Some(self.path.clone()),
        })
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(format!("failed to create config directory: {e}")))?;
        }

        let content = config.to_json()?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn ensure_exists(&self) -> Result<bool, ConfigError> {
        if self.exists() {
            return Ok(false);
        }

        self.save(&AppConfig::defaults()).await?;
        Ok(true)
    }
}
