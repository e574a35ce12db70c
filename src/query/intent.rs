//! Intents for the request lifecycle.

use crate::query::client::RequestError;
use crate::ui::mvi::Intent;

/// Transitions a binder can apply to its [`RequestState`](super::RequestState).
#[derive(Debug, Clone)]
pub enum QueryIntent<T> {
    /// A request for new inputs was issued.
    Issue,

    /// The request resolved; carries the normalized payload.
    Succeeded(T),

    /// The request (or normalization) failed.
    Failed(RequestError),
}

impl<T: Send + 'static> Intent for QueryIntent<T> {}
