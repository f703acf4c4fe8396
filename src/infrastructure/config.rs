//! Application configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Application configuration
///
/// Built-in defaults, overridden by an optional `tracker.toml`, overridden in
/// turn by `TRACKER_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Catalog location: a file path or an http(s) URL
    pub catalog_source: String,

    /// SQLite connection URL for character storage
    pub database_url: String,

    /// Undo history depth
    pub history_limit: usize,
    /// Maximum number of named save slots
    pub slot_limit: usize,

    /// Seconds between background saves
    pub autosave_interval_secs: u64,

    /// Directory character exports are written to
    pub export_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from `tracker.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from("tracker")
    }

    /// Load configuration using `file_stem` as the optional config file
    pub fn load_from(file_stem: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("catalog_source", "data/spells.json")?
            .set_default("database_url", "sqlite://tracker.db?mode=rwc")?
            .set_default("history_limit", 50_i64)?
            .set_default("slot_limit", 10_i64)?
            .set_default("autosave_interval_secs", 30_i64)?
            .set_default("export_dir", ".")?
            .add_source(File::with_name(file_stem).required(false))
            .add_source(Environment::with_prefix("TRACKER").try_parsing(true))
            .build()
            .context("Failed to read tracker configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid tracker configuration")?;

        anyhow::ensure!(
            config.autosave_interval_secs > 0,
            "autosave_interval_secs must be greater than zero"
        );

        Ok(config)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = AppConfig::load_from("no_such_tracker_config").unwrap();

        assert_eq!(config.history_limit, 50);
        assert_eq!(config.slot_limit, 10);
        assert_eq!(config.autosave_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tracker.toml");
        std::fs::write(
            &path,
            "catalog_source = \"https://example.org/spells.json\"\nslot_limit = 3\n",
        )
        .unwrap();

        let stem = dir.path().join("tracker");
        let config = AppConfig::load_from(stem.to_str().unwrap()).unwrap();

        assert_eq!(config.catalog_source, "https://example.org/spells.json");
        assert_eq!(config.slot_limit, 3);
        assert_eq!(config.history_limit, 50);
    }
}
