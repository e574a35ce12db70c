//! The fetch-to-render-state binder.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::runtime::Handle;
use uuid::Uuid;

use crate::config::QueryConfig;
use crate::ui::mvi::Reducer;

use super::client::{RequestClient, RequestError};
use super::input::{InputError, QueryInput};
use super::intent::QueryIntent;
use super::liveness::{Liveness, LivenessToken};
use super::reducer::QueryReducer;
use super::state::RequestState;

/// Turns a raw response into the presented data.
pub type Normalize<T> = Arc<dyn Fn(Value) -> Result<T, RequestError> + Send + Sync>;

/// Called with the new state after every transition.
pub type Observer<T> = Arc<dyn Fn(&RequestState<T>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Drop responses whose request was superseded by newer inputs.
    /// When false, whichever response resolves last wins.
    pub discard_stale_responses: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            discard_stale_responses: true,
        }
    }
}

impl From<&QueryConfig> for QueryOptions {
    fn from(config: &QueryConfig) -> Self {
        Self {
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

/// What happened to a response once it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Applied,
    Stale,
    TornDown,
}

struct Shared<T> {
    state: Mutex<RequestState<T>>,
    observers: Mutex<Vec<Observer<T>>>,
    /// Tag of the most recently issued request.
    generation: AtomicU64,
}

impl<T> Shared<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Reduce and notify while `state` is held, so observers never see a
    /// half-applied transition and teardown can fence out late results.
    fn apply_locked(&self, state: &mut RequestState<T>, intent: QueryIntent<T>) {
        *state = QueryReducer::<T>::reduce(std::mem::take(state), intent);
        let observers = self.observers.lock().clone();
        for observer in &observers {
            observer(&*state);
        }
    }

    fn resolve(
        &self,
        token: &LivenessToken,
        generation: u64,
        discard_stale: bool,
        intent: QueryIntent<T>,
    ) -> Resolution {
        let mut state = self.state.lock();
        if !token.is_live() {
            return Resolution::TornDown;
        }
        if discard_stale && self.generation.load(Ordering::SeqCst) != generation {
            return Resolution::Stale;
        }
        self.apply_locked(&mut state, intent);
        Resolution::Applied
    }
}

/// Keeps a [`RequestState`] in sync with the latest request implied by
/// the observed `(query, variables)` inputs.
///
/// Call [`observe`](Self::observe) on every render. A request is issued only
/// when the inputs differ structurally from the previous snapshot, so
/// re-rendering with a freshly built but equal `variables` object is free.
///
/// Dropping the binder tears it down: responses arriving afterwards are
/// discarded and in-flight request futures are abandoned.
pub struct QueryBinder<T> {
    client: Arc<dyn RequestClient>,
    normalize: Normalize<T>,
    options: QueryOptions,
    runtime: Handle,
    shared: Arc<Shared<T>>,
    liveness: Liveness,
    input: Option<QueryInput>,
}

impl QueryBinder<Value> {
    /// Binder that presents the raw response unchanged.
    pub fn new(client: Arc<dyn RequestClient>, runtime: Handle) -> Self {
        Self::with_normalize(client, runtime, |raw| Ok(raw))
    }
}

impl<T> QueryBinder<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub fn with_normalize<F>(client: Arc<dyn RequestClient>, runtime: Handle, normalize: F) -> Self
    where
        F: Fn(Value) -> Result<T, RequestError> + Send + Sync + 'static,
    {
        Self {
            client,
            normalize: Arc::new(normalize),
            options: QueryOptions::default(),
            runtime,
            shared: Arc::new(Shared {
                state: Mutex::new(RequestState::default()),
                observers: Mutex::new(Vec::new()),
                generation: AtomicU64::new(0),
            }),
            liveness: Liveness::new(),
            input: None,
        }
    }

    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Register an observer for state transitions.
    ///
    /// Observers run while the state is locked and must not call back into
    /// the binder.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&RequestState<T>) + Send + Sync + 'static,
    {
        self.shared.observers.lock().push(Arc::new(observer));
    }

    /// Record the inputs of the current render.
    ///
    /// Returns true if a request was issued.
    pub fn observe(&mut self, input: QueryInput) -> bool {
        if !self.liveness.is_live() {
            return false;
        }
        if let Some(previous) = &self.input {
            if previous.same_as(&input) {
                return false;
            }
        }
        self.input = Some(input.clone());
        self.issue(input);
        true
    }

    /// Validate raw inputs and [`observe`](Self::observe) them.
    pub fn bind(&mut self, query: &str, variables: Value) -> Result<bool, InputError> {
        let input = QueryInput::new(query, variables)?;
        Ok(self.observe(input))
    }

    /// Issue the request for the current inputs again.
    pub fn refetch(&mut self) -> bool {
        if !self.liveness.is_live() {
            return false;
        }
        match self.input.clone() {
            Some(input) => {
                self.issue(input);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> RequestState<T> {
        self.shared.state.lock().clone()
    }

    /// Hand the current state to a render function.
    pub fn render<R>(&self, view: impl FnOnce(&RequestState<T>) -> R) -> R {
        view(&self.state())
    }

    fn issue(&mut self, input: QueryInput) {
        let generation = {
            let mut state = self.shared.state.lock();
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            self.shared.apply_locked(&mut state, QueryIntent::Issue);
            generation
        };

        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, query = input.query(), generation, "Issuing request");

        let client = Arc::clone(&self.client);
        let normalize = Arc::clone(&self.normalize);
        let shared = Arc::clone(&self.shared);
        let token = self.liveness.token();
        let discard_stale = self.options.discard_stale_responses;

        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = token.dropped() => {
                    tracing::trace!(%request_id, "Owner torn down, abandoning request");
                    return;
                }
                result = client.request(input.query(), input.variables()) => result,
            };

            let intent = match result.and_then(|raw| normalize(raw)) {
                Ok(data) => QueryIntent::Succeeded(data),
                Err(error) => {
                    tracing::warn!(%request_id, %error, "Request failed");
                    QueryIntent::Failed(error)
                }
            };

            match shared.resolve(&token, generation, discard_stale, intent) {
                Resolution::Applied => tracing::debug!(%request_id, "Request resolved"),
                Resolution::Stale => {
                    tracing::debug!(%request_id, generation, "Discarding response for superseded inputs")
                }
                Resolution::TornDown => {
                    tracing::trace!(%request_id, "Response arrived after teardown")
                }
            }
        });
    }
}

impl<T> QueryBinder<T> {
    /// Most recently observed inputs.
    pub fn input(&self) -> Option<&QueryInput> {
        self.input.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.liveness.is_live()
    }

    /// Stop applying results. No transition or observer call happens after
    /// this returns.
    pub fn teardown(&mut self) {
        // Taking the state lock waits out any resolution being applied.
        let _state = self.shared.state.lock();
        if self.liveness.kill() {
            tracing::trace!("Query binder torn down");
        }
    }
}

impl<T> Drop for QueryBinder<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
