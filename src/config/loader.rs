use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "MARKETLOG_BASE_URL";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/marketlog/config.toml` on Unix/macOS, or the
    /// equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("marketlog").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path.
    ///
    /// - If the file doesn't exist, starts from `Config::default()`.
    /// - If the file exists, parses it as TOML.
    /// - Applies the `MARKETLOG_BASE_URL` override, then validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_base_url(path, None)
    }

    /// Like [`Config::load_from`], with `base_url` taking precedence over
    /// both the file and the environment. Validation runs after every
    /// override is applied.
    pub fn load_with_base_url(path: &Path, base_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Config::default()
        };

        if let Ok(from_env) = std::env::var(BASE_URL_ENV) {
            if !from_env.trim().is_empty() {
                config.api.base_url = from_env;
            }
        }
        if let Some(base_url) = base_url {
            config.api.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL is an absolute http(s) URL
    /// - Timeouts and the page size are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid base_url '{}': {}", self.api.base_url, e),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError {
                message: format!("base_url must use http or https, got '{}'", url.scheme()),
            });
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Timeouts must be greater than zero".to_string(),
            });
        }

        if self.ui.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "page_size must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
