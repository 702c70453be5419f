//! TOML configuration for the prediction service connection.
//!
//! Settings live in `config.toml` under the `.effortcast` root. A missing file
//! is written out with defaults on first load so users can find and edit it.
//! Form inputs are never persisted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default base URL of the hosted prediction service.
pub const DEFAULT_SERVICE_BASE_URL: &str = "https://greenfield-ml-model-1b.onrender.com";

/// Aggregate application settings loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
}

/// Connection settings for the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Base URL of the prediction service; `/predict` is appended per request.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_SERVICE_BASE_URL.to_string()
}

/// Errors raised while loading, validating, or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid service base URL {url:?}: {source}")]
    InvalidBaseUrl { url: String, source: url::ParseError },
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
}

impl AppConfig {
    /// Full URL of the prediction endpoint, validated against the configured base.
    pub fn predict_endpoint(&self) -> Result<String, ConfigError> {
        let base = Url::parse(&self.service.base_url).map_err(|source| {
            ConfigError::InvalidBaseUrl {
                url: self.service.base_url.clone(),
                source,
            }
        })?;
        Ok(format!("{}/predict", base.as_str().trim_end_matches('/')))
    }
}

/// Path of the config file inside the app root.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the configuration, writing a default file on first launch.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if path.exists() {
        load_from(&path)
    } else {
        let config = AppConfig::default();
        save_to_path(&config, &path)?;
        Ok(config)
    }
}

fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let data =
        toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
            path: path.to_path_buf(),
            source,
        })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
