use crate::router::MAX_USERNAME_LEN;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HomeState {
    pub input: String,
    /// Validation message from the last submit.
    pub error: Option<String>,
    /// Validated username waiting for the app to navigate.
    pub submitted: Option<String>,
}

impl UiState for HomeState {}

impl HomeState {
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// The prompt holds the longest username GitHub allows.
    pub fn is_full(&self) -> bool {
        self.input.chars().count() >= MAX_USERNAME_LEN
    }

    /// Typed length against the limit, e.g. `"7/39"`.
    pub fn length_hint(&self) -> String {
        format!("{}/{}", self.input.chars().count(), MAX_USERNAME_LEN)
    }
}
