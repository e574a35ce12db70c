use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

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
    /// Uses `~/.config/ghprofile/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("ghprofile").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The API URL is an http(s) URL
    /// - Timeouts and the tick rate are positive
    /// - The repository limit is within GitHub's page size (1-100)
    /// - A user agent is set
    pub fn validate(&self) -> Result<(), ConfigError> {
        let api_url = self.github.api_url.trim();
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(ConfigError::ValidationError {
                message: format!("github.api_url '{}' must be an http(s) URL", api_url),
            });
        }

        if self.github.timeout_seconds == 0 || self.github.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "github timeouts must be greater than zero".to_string(),
            });
        }

        if self.github.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "github.user_agent must not be empty".to_string(),
            });
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "ui.tick_rate_ms must be greater than zero".to_string(),
            });
        }

        if !(1..=100).contains(&self.ui.repo_limit) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "ui.repo_limit must be between 1 and 100, got {}",
                    self.ui.repo_limit
                ),
            });
        }

        Ok(())
    }
}
