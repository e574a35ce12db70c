use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::RequestError;

use super::error::ClientError;

/// Response of `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// One item of `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

pub fn normalize_profile(raw: Value) -> Result<UserProfile, RequestError> {
    decode(raw, "user profile")
}

pub fn normalize_repos(raw: Value) -> Result<Vec<RepoSummary>, RequestError> {
    decode(raw, "repository list")
}

fn decode<T: DeserializeOwned>(raw: Value, what: &str) -> Result<T, RequestError> {
    serde_json::from_value(raw)
        .map_err(|e| ClientError::Decode(format!("unexpected {} shape: {}", what, e)).into())
}
