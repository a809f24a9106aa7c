use std::{fs, path::PathBuf};

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Category, KeepError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// File holding the key-value store
    pub data_file: PathBuf,

    /// Category assigned when `add` is not given one
    pub default_category: Category,
}

impl Default for Config {
    fn default() -> Self {
        let data_file = ProjectDirs::from("", "", "notekeep")
            .map(|dirs| dirs.data_dir().join("store.json"))
            .unwrap_or_else(|| PathBuf::from("notekeep.json"));

        Self {
            data_file,
            default_category: Category::Personal,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the platform-standard
    /// location when no path is given. A missing file yields the defaults;
    /// an unparseable file is an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path.or_else(Self::default_config_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| KeepError::ConfigError {
            message: format!("invalid config file {}: {}", path.display(), e),
        })
    }

    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "notekeep").map(|dirs| dirs.config_dir().join("config.json"))
    }
}
