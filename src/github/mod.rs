//! GitHub API access for the query binder.

mod client;
mod error;
mod models;
mod request;

pub use client::GitHubClient;
pub use error::ClientError;
pub use models::{normalize_profile, normalize_repos, RepoSummary, UserProfile};
pub use request::{expand_path, ExpandedRoute, ParsedQuery};
