use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeIntent {
    Insert(char),
    Backspace,
    /// Esc: empty the prompt and drop any validation error.
    Clear,
    /// Enter: validate the prompt and, if valid, request navigation.
    Submit,
    /// The app acted on the submitted username.
    Navigated,
}

impl Intent for HomeIntent {}
