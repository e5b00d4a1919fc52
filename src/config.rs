use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::stats::DEFAULT_TOP_N;

const APP_NAME: &str = "simp-thing";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpConfig {
    /// Where the roster database lives. Defaults to the user's data directory.
    pub database_path: Option<PathBuf>,
    /// How many entries the dashboard ranks.
    pub top_n: usize,
    /// Fixed seed for mission rotation. Random when unset.
    pub mission_seed: Option<u64>,
}

impl Default for SimpConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            top_n: DEFAULT_TOP_N,
            mission_seed: None,
        }
    }
}

impl SimpConfig {
    /// Load configuration from the user's config directory.
    /// Returns default config if file doesn't exist or fails to parse.
    pub fn load() -> Self {
        match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimpConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, SimpConfig::default());
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"mission_seed": 9}"#).unwrap();

        let config = SimpConfig::load_from(&path).unwrap();
        assert_eq!(config.mission_seed, Some(9));
        assert_eq!(config.top_n, 5);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = SimpConfig {
            database_path: Some(dir.path().join("simp.db")),
            top_n: 3,
            mission_seed: Some(1),
        };

        config.save_to(&path).unwrap();
        assert_eq!(SimpConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "top_n = 3").unwrap();
        assert!(SimpConfig::load_from(&path).is_err());
    }
}
