use super::intent::Intent;
use super::state::UiState;

/// Pure `(State, Intent) -> State` transition.
///
/// Every state change of a screen or binder goes through a reducer, so each
/// reachable state is one the reducer can produce.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
