use crate::router::validate_username;
use crate::ui::home::intent::HomeIntent;
use crate::ui::home::state::HomeState;
use crate::ui::mvi::Reducer;

pub struct HomeReducer;

impl Reducer for HomeReducer {
    type State = HomeState;
    type Intent = HomeIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            HomeIntent::Insert(ch) => {
                if ch.is_control() || state.is_full() {
                    return state;
                }
                let mut input = state.input;
                input.push(ch);
                HomeState {
                    input,
                    error: None,
                    submitted: None,
                }
            }
            HomeIntent::Backspace => {
                let mut input = state.input;
                input.pop();
                HomeState {
                    input,
                    error: None,
                    submitted: None,
                }
            }
            HomeIntent::Clear => HomeState::default(),
            HomeIntent::Submit => {
                let username = state.input.trim().to_string();
                match validate_username(&username) {
                    Ok(()) => HomeState {
                        input: state.input,
                        error: None,
                        submitted: Some(username),
                    },
                    Err(err) => HomeState {
                        input: state.input,
                        error: Some(err.to_string()),
                        submitted: None,
                    },
                }
            }
            HomeIntent::Navigated => HomeState::default(),
        }
    }
}
