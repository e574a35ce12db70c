//! Contract between the binder and whatever issues the requests.

use async_trait::async_trait;
use serde_json::Value;

/// The single failure kind seen by the binder: "request failed".
///
/// Carries whatever value the client rejected with. No further
/// classification happens at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestError {
    payload: Value,
}

impl RequestError {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// Build a failure whose payload is `{"message": message}`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(serde_json::json!({ "message": message.into() }))
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.payload.get("message").and_then(Value::as_str) {
            Some(message) => write!(f, "Request failed: {}", message),
            None => write!(f, "Request failed: {}", self.payload),
        }
    }
}

impl std::error::Error for RequestError {}

/// Issues requests on behalf of a binder.
///
/// Resolves with the parsed payload or fails with a [`RequestError`].
/// Transport details (headers, status codes, timeouts) are the
/// implementation's business.
#[async_trait]
pub trait RequestClient: Send + Sync {
    async fn request(&self, query: &str, variables: &Value) -> Result<Value, RequestError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_prefers_message_field() {
        let err = RequestError::new(json!({"message": "404", "status": 404}));
        assert_eq!(err.to_string(), "Request failed: 404");
    }

    #[test]
    fn display_falls_back_to_payload() {
        let err = RequestError::new(json!(["boom"]));
        assert_eq!(err.to_string(), r#"Request failed: ["boom"]"#);
    }

    #[test]
    fn message_builds_object_payload() {
        let err = RequestError::message("offline");
        assert_eq!(err.payload(), &json!({"message": "offline"}));
        assert_eq!(err.into_payload(), json!({"message": "offline"}));
    }
}
