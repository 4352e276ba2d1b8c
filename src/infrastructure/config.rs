//! Configuration infrastructure
//!
//! Contains configuration loading and management for the catalog backend.
//! The configuration lives in a JSON file under the platform config
//! directory and is created with defaults on first load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

use crate::application::use_cases::ImportOptions;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Import reconciler behavior (batch failure handling).
    #[serde(default)]
    pub import: ImportOptions,
}

/// Database connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database URL (sqlite:/path/to/catalog.db).
    pub url: String,

    /// Maximum pool connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: 10,
        }
    }
}

fn default_database_url() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("computer-store");
    format!("sqlite:{}", data_dir.join("catalog.db").display())
}

/// Logging output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error). `RUST_LOG`
    /// overrides this when set.
    pub level: String,

    /// Emit structured JSON instead of the human-readable format.
    pub json_output: bool,

    /// Also write logs to daily-rotated files.
    pub file_output: bool,

    /// Log file directory. Defaults to `logs/` next to the executable.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_output: false,
            file_output: false,
            directory: None,
        }
    }
}

/// Loads and persists the application configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("platform config directory unavailable")?
            .join("computer-store");
        Ok(Self {
            config_path: config_dir.join("config.json"),
        })
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the configuration, creating the file with defaults when missing.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            let config = AppConfig::default();
            self.save_config(&config).await?;
            info!(path = %self.config_path.display(), "created default configuration");
            return Ok(config);
        }

        let raw = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("failed to read {}", self.config_path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.config_path.display()))?;
        Ok(config)
    }

    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, raw)
            .await
            .with_context(|| format!("failed to write {}", self.config_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_creates_default_config_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let manager = ConfigManager::with_path(temp_dir.path().join("config.json"));

        let config = manager.load_config().await?;
        assert!(manager.config_path().exists());
        assert_eq!(config.logging.level, "info");
        assert!(!config.import.continue_on_record_error);
        Ok(())
    }

    #[tokio::test]
    async fn config_round_trips_through_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let manager = ConfigManager::with_path(temp_dir.path().join("config.json"));

        let mut config = AppConfig::default();
        config.database.max_connections = 3;
        config.import.continue_on_record_error = true;
        manager.save_config(&config).await?;

        let loaded = manager.load_config().await?;
        assert_eq!(loaded.database.max_connections, 3);
        assert!(loaded.import.continue_on_record_error);
        Ok(())
    }
}
