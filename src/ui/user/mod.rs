//! Profile screen for `/:username`.

mod screen;

pub use screen::{UserScreen, PROFILE_QUERY, REPOS_QUERY, REPO_SORT};
