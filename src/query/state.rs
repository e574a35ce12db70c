//! The four-field status record exposed by a binder.

use crate::query::client::RequestError;
use crate::ui::mvi::UiState;

/// Status of the most recent request implied by a binder's inputs.
///
/// `data` and `error` are mutually exclusive after any resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    /// A request for the current inputs completed successfully.
    pub loaded: bool,
    /// A request for the current inputs is outstanding.
    pub fetching: bool,
    pub data: Option<T>,
    pub error: Option<RequestError>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            loaded: false,
            fetching: false,
            data: None,
            error: None,
        }
    }
}

impl<T> UiState for RequestState<T> where T: Clone + PartialEq + Send + 'static {}

impl<T> RequestState<T> {
    /// Nothing issued yet and nothing to show.
    pub fn is_idle(&self) -> bool {
        !self.fetching && self.data.is_none() && self.error.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
