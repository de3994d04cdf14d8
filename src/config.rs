use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "KEYWORD_WATCH_CONFIG";

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Keyword store file; platform default when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Print every input line before its detections
    #[serde(default)]
    pub echo_text: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            log_filter: default_log_filter(),
            echo_text: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load configuration from `path`, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
            let config: Config =
                serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })?;

            tracing::info!("Loaded config from: {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!("Created default config at: {}", path.display());
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Config file path: env override, else the app config directory
    pub fn config_path() -> PathBuf {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }

        Self::app_dir().join("config.json")
    }

    /// Per-user application directory (config, store, logs)
    pub fn app_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("KeywordWatch"))
            .unwrap_or_else(|| PathBuf::from("KeywordWatch"))
    }
}
