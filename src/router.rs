//! Screen routing: `/` is the home screen, `/:username` a user's profile.

use std::fmt;

use thiserror::Error;

pub const MAX_USERNAME_LEN: usize = 39;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Username '{0}' is longer than 39 characters")]
    TooLong(String),

    #[error("Username '{0}' may only contain letters, digits and single hyphens, and cannot start or end with a hyphen")]
    InvalidUsername(String),

    #[error("Unknown route '{0}'")]
    UnknownPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    User { username: String },
}

impl Route {
    /// Route to a user's profile, validating the username.
    pub fn user(username: &str) -> Result<Self, RouteError> {
        let username = username.trim();
        validate_username(username)?;
        Ok(Route::User {
            username: username.to_string(),
        })
    }

    /// Parse a path like `/` or `/octocat`.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Err(RouteError::UnknownPath(trimmed.to_string()));
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Ok(Route::Home);
        }
        if rest.contains('/') {
            return Err(RouteError::UnknownPath(trimmed.to_string()));
        }
        Route::user(rest)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::User { username } => format!("/{}", username),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Route::Home => None,
            Route::User { username } => Some(username),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// GitHub login rules: 1-39 ASCII alphanumerics or single hyphens, no
/// leading or trailing hyphen.
pub fn validate_username(username: &str) -> Result<(), RouteError> {
    if username.is_empty() {
        return Err(RouteError::EmptyUsername);
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(RouteError::TooLong(username.to_string()));
    }
    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid_chars
        || username.starts_with('-')
        || username.ends_with('-')
        || username.contains("--")
    {
        return Err(RouteError::InvalidUsername(username.to_string()));
    }
    Ok(())
}
