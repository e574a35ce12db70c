use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub API access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the REST API (e.g., "https://api.github.com").
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Direct API token. Takes precedence over `token_env_var`.
    #[serde(default)]
    pub token: Option<String>,
    /// Environment variable consulted when `token` is unset.
    #[serde(default = "default_token_env_var")]
    pub token_env_var: String,
    /// Value of the `User-Agent` header (GitHub rejects requests without one).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Number of repositories requested for the user screen (1-100).
    #[serde(default = "default_repo_limit")]
    pub repo_limit: u32,
}

/// Query binder behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Drop responses of superseded requests instead of applying them.
    #[serde(default = "default_discard_stale")]
    pub discard_stale_responses: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. The terminal is owned by the UI, so without a file nothing is logged.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env_var() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_user_agent() -> String {
    concat!("ghprofile/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_repo_limit() -> u32 {
    30
}

fn default_discard_stale() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            token_env_var: default_token_env_var(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            repo_limit: default_repo_limit(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            discard_stale_responses: default_discard_stale(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl GithubConfig {
    /// Resolve the API token: explicit value first, then the environment.
    ///
    /// Empty strings count as unset.
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.token_env_var)
                    .ok()
                    .filter(|t| !t.trim().is_empty())
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
