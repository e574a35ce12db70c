//! Errors raised by the GitHub client.

use serde_json::{json, Value};
use thiserror::Error;

use crate::query::RequestError;

/// Errors that can occur while talking to the GitHub API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to build the underlying HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Query text could not be interpreted
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A configured header value is not valid HTTP
    #[error("Invalid value for header '{name}'")]
    InvalidHeader { name: &'static str },

    /// A path placeholder had no matching variable
    #[error("Missing variable '{name}' for path placeholder")]
    MissingVariable { name: String },

    /// GraphQL was requested without a token
    #[error("GraphQL queries require a token (set {env_var} or github.token)")]
    MissingToken { env_var: String },

    /// Could not reach the API
    #[error("Connection failed: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    /// API answered with a non-success status
    #[error("GitHub API error ({status}): {message}")]
    Status {
        status: u16,
        message: String,
        body: Value,
    },

    /// GraphQL response carried an `errors` member
    #[error("GraphQL error: {message}")]
    GraphQl { message: String, errors: Value },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Short identifier used in failure payloads.
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::Build(_) => "build_error",
            ClientError::InvalidQuery(_) => "invalid_query",
            ClientError::InvalidHeader { .. } => "invalid_header",
            ClientError::MissingVariable { .. } => "missing_variable",
            ClientError::MissingToken { .. } => "missing_token",
            ClientError::Connection { .. } => "connection_error",
            ClientError::Status { .. } => "status_error",
            ClientError::GraphQl { .. } => "graphql_error",
            ClientError::Decode(_) => "decode_error",
        }
    }

    /// JSON payload handed to the binder as the failure value.
    pub fn payload(&self) -> Value {
        let message = match self {
            ClientError::Status { message, .. } | ClientError::GraphQl { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        };
        let mut payload = json!({
            "type": self.error_type(),
            "message": message,
        });
        match self {
            ClientError::Status { status, body, .. } => {
                payload["status"] = json!(status);
                payload["body"] = body.clone();
            }
            ClientError::GraphQl { errors, .. } => {
                payload["errors"] = errors.clone();
            }
            _ => {}
        }
        payload
    }
}

impl From<ClientError> for RequestError {
    fn from(err: ClientError) -> Self {
        RequestError::new(err.payload())
    }
}
