//! Locates and loads configuration files

use std::path::{Path, PathBuf};

use super::JsonClientConfig;
use crate::error::{Error, Result};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "WRAPLINE_CONFIG";

const CONFIG_FILE_NAMES: [&str; 2] = [".wrapline.json", "wrapline.json"];

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `explicit`, then `$WRAPLINE_CONFIG`, then the nearest config
    /// file above the working directory. Falls back to an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<JsonClientConfig> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            tracing::debug!("using config from ${}", CONFIG_ENV_VAR);
            return Self::load_from_file(Path::new(&path));
        }

        match std::env::current_dir() {
            Ok(cwd) => Self::load_from_dir(&cwd),
            Err(_) => Ok(JsonClientConfig::default()),
        }
    }

    /// Load the nearest config file at or above `start`
    pub fn load_from_dir(start: &Path) -> Result<JsonClientConfig> {
        match Self::find_config_file(start) {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("no config file found above {:?}", start);
                Ok(JsonClientConfig::default())
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<JsonClientConfig> {
        tracing::debug!("loading config from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Error::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        JsonClientConfig::from_json(&contents)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = if start_path.is_file() {
            start_path.parent()?
        } else {
            start_path
        };

        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
            current = current.parent()?;
        }
    }
}
