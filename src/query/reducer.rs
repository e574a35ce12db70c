//! Reducer for the request lifecycle.

use std::marker::PhantomData;

use crate::ui::mvi::Reducer;

use super::intent::QueryIntent;
use super::state::RequestState;

/// Merges a partial update into the current state.
///
/// `Issue` only raises `fetching`; previous `data`/`error` stay visible
/// until the request resolves. Resolutions replace all four fields at once.
pub struct QueryReducer<T>(PhantomData<T>);

impl<T> Reducer for QueryReducer<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    type State = RequestState<T>;
    type Intent = QueryIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            QueryIntent::Issue => RequestState {
                fetching: true,
                ..state
            },
            QueryIntent::Succeeded(data) => RequestState {
                loaded: true,
                fetching: false,
                data: Some(data),
                error: None,
            },
            QueryIntent::Failed(error) => RequestState {
                loaded: false,
                fetching: false,
                data: None,
                error: Some(error),
            },
        }
    }
}
