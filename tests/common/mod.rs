//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_github;

use async_trait::async_trait;
use ghprofile::query::{QueryBinder, RequestClient, RequestError, RequestState};
use parking_lot::Mutex;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::oneshot;

type Responder = oneshot::Sender<Result<Value, RequestError>>;

/// One call received by [`ScriptedClient`].
pub struct PendingCall {
    pub query: String,
    pub variables: Value,
    responder: Option<Responder>,
}

/// Request client whose calls stay pending until the test resolves them.
#[derive(Default)]
pub struct ScriptedClient {
    calls: Mutex<Vec<PendingCall>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn call(&self, index: usize) -> (String, Value) {
        let calls = self.calls.lock();
        let call = &calls[index];
        (call.query.clone(), call.variables.clone())
    }

    /// Index of the first call made with `query`.
    pub fn find_call(&self, query: &str) -> Option<usize> {
        self.calls.lock().iter().position(|c| c.query == query)
    }

    /// Resolve call `index` with a success payload.
    pub fn succeed(&self, index: usize, payload: Value) {
        self.respond(index, Ok(payload));
    }

    /// Reject call `index` with `payload`.
    pub fn fail(&self, index: usize, payload: Value) {
        self.respond(index, Err(RequestError::new(payload)));
    }

    fn respond(&self, index: usize, result: Result<Value, RequestError>) {
        let responder = self.calls.lock()[index]
            .responder
            .take()
            .expect("call already resolved");
        // The binder may have abandoned the call; that is what some tests check.
        let _ = responder.send(result);
    }

    /// True once the binder stopped waiting on call `index`.
    pub fn is_abandoned(&self, index: usize) -> bool {
        self.calls.lock()[index]
            .responder
            .as_ref()
            .map(|r| r.is_closed())
            .unwrap_or(false)
    }

    /// Wait until at least `n` calls have reached the client.
    pub async fn wait_for_calls(&self, n: usize) {
        let reached = wait_until(Duration::from_secs(2), || self.call_count() >= n).await;
        assert!(reached, "expected {} calls, saw {}", n, self.call_count());
    }
}

#[async_trait]
impl RequestClient for ScriptedClient {
    async fn request(&self, query: &str, variables: &Value) -> Result<Value, RequestError> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().push(PendingCall {
            query: query.to_string(),
            variables: variables.clone(),
            responder: Some(tx),
        });
        rx.await
            .unwrap_or_else(|_| Err(RequestError::message("scripted call dropped")))
    }
}

/// Records every state an observer sees.
pub struct StateSpy<T> {
    seen: Arc<Mutex<Vec<RequestState<T>>>>,
}

impl<T> StateSpy<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub fn attach(binder: &QueryBinder<T>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        binder.subscribe(move |state: &RequestState<T>| sink.lock().push(state.clone()));
        Self { seen }
    }

    pub fn states(&self) -> Vec<RequestState<T>> {
        self.seen.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn last(&self) -> Option<RequestState<T>> {
        self.seen.lock().last().cloned()
    }
}

/// Poll `condition` every few milliseconds until it holds or `timeout` passes.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// Let spawned tasks run without waiting for any particular condition.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
