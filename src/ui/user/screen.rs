use std::sync::Arc;

use serde_json::json;
use tokio::runtime::Handle;

use crate::github::{normalize_profile, normalize_repos, RepoSummary, UserProfile};
use crate::query::{InputError, QueryBinder, QueryOptions, RequestClient, RequestState};
use crate::ui::events::{AppEvent, EventSink};

pub const PROFILE_QUERY: &str = "GET /users/{username}";
pub const REPOS_QUERY: &str = "GET /users/{username}/repos";
pub const REPO_SORT: &str = "updated";

/// A user's profile and repositories, each kept in sync by its own binder.
///
/// Dropping the screen tears both binders down.
pub struct UserScreen {
    username: String,
    repo_limit: u32,
    profile: QueryBinder<UserProfile>,
    repos: QueryBinder<Vec<RepoSummary>>,
}

impl UserScreen {
    pub fn new(
        username: impl Into<String>,
        client: Arc<dyn RequestClient>,
        runtime: Handle,
        options: QueryOptions,
        repo_limit: u32,
    ) -> Self {
        let profile = QueryBinder::with_normalize(
            Arc::clone(&client),
            runtime.clone(),
            normalize_profile,
        )
        .with_options(options);
        let repos = QueryBinder::with_normalize(client, runtime, normalize_repos)
            .with_options(options);

        Self {
            username: username.into(),
            repo_limit,
            profile,
            repos,
        }
    }

    /// Post [`AppEvent::QueryUpdated`] on every transition of either binder.
    pub fn notify(&self, sink: EventSink) {
        let profile_sink = sink.clone();
        self.profile
            .subscribe(move |_| profile_sink.post(AppEvent::QueryUpdated));
        self.repos.subscribe(move |_| sink.post(AppEvent::QueryUpdated));
    }

    /// Hand the binders this render's inputs.
    ///
    /// Variables are rebuilt on each call; binders only issue a request when
    /// they differ structurally from the previous render. Returns the number
    /// of requests issued.
    pub fn observe(&mut self) -> Result<usize, InputError> {
        let profile_issued = self
            .profile
            .bind(PROFILE_QUERY, json!({ "username": self.username }))?;
        let repos_issued = self.repos.bind(
            REPOS_QUERY,
            json!({
                "username": self.username,
                "per_page": self.repo_limit,
                "sort": REPO_SORT,
            }),
        )?;
        Ok(usize::from(profile_issued) + usize::from(repos_issued))
    }

    /// Re-issue both requests with the current inputs.
    pub fn refetch(&mut self) -> usize {
        usize::from(self.profile.refetch()) + usize::from(self.repos.refetch())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile(&self) -> RequestState<UserProfile> {
        self.profile.state()
    }

    pub fn repos(&self) -> RequestState<Vec<RepoSummary>> {
        self.repos.state()
    }

    pub fn is_live(&self) -> bool {
        self.profile.is_live() && self.repos.is_live()
    }

    pub fn teardown(&mut self) {
        self.profile.teardown();
        self.repos.teardown();
        tracing::debug!(username = %self.username, "User screen torn down");
    }
}
