use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};
use crate::router::{Route, RouteError};

#[derive(Parser, Debug, Default)]
#[command(
    name = "ghprofile",
    version,
    about = "Browse GitHub user profiles in the terminal"
)]
pub struct Cli {
    /// Open this user's profile instead of the home screen
    pub username: Option<String>,

    /// Path to the config file (default: ~/.config/ghprofile/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the GitHub API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level or filter directive (e.g. "debug", "ghprofile=trace")
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Route to open first.
    pub fn initial_route(&self) -> Result<Route, RouteError> {
        match &self.username {
            Some(username) => Route::user(username),
            None => Ok(Route::Home),
        }
    }

    /// Load the config file, apply flag overrides, and validate the result.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load_from(&self.config_path())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply flag overrides on top of file values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(api_url) = &self.api_url {
            config.github.api_url = api_url.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
