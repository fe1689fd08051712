//! Project configuration stored in `.orrery/config.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Directory holding configuration and the default store.
pub const CONFIG_DIR: &str = ".orrery";

const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How query results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: String,
    /// Store location, relative to the project root unless absolute.
    pub store: PathBuf,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            store: Path::new(CONFIG_DIR).join("store"),
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Path of the config file under a project root.
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Loads the config under `root`, falling back to defaults if absent.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(root);
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the config under `root`, creating the config directory.
    pub fn save(&self, root: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(root.join(CONFIG_DIR))?;
        fs::write(Self::path(root), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Absolute store location for a project root.
    pub fn store_path(&self, root: &Path) -> PathBuf {
        root.join(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };

        config.save(dir.path()).unwrap();

        assert!(Config::path(dir.path()).exists());
        assert_eq!(Config::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        fs::write(Config::path(dir.path()), r#"{ "format": "json" }"#).unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.store, Path::new(".orrery").join("store"));
    }

    #[test]
    fn test_store_path_is_relative_to_root() {
        let root = Path::new("/srv/routes");
        let config = Config::default();
        assert_eq!(
            config.store_path(root),
            Path::new("/srv/routes/.orrery/store")
        );
    }
}
