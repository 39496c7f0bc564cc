//! Configuration port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// A loaded configuration and the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// `None` when no file existed and defaults were used
    pub source: Option<PathBuf>,
}

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load and validate configuration.
    ///
    /// # Returns
    /// Defaults if the file doesn't exist. Malformed or invalid content is
    /// an error.
    async fn load(&self) -> Result<LoadedConfig, ConfigError>;

    /// Save configuration to storage.
    ///
    /// # Arguments
    /// * `config` - The configuration to save
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Write the default document if no file exists yet.
    /// Returns true if a file was created.
    async fn ensure_exists(&self) -> Result<bool, ConfigError>;
}
