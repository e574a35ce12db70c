//! Interpreting query text as REST routes or GraphQL documents.
//!
//! `"GET /users/{username}"` is a REST route: placeholders (`{name}` or
//! `:name`) are filled from the variables and the leftovers become query
//! parameters (GET/DELETE) or a JSON body (POST/PUT/PATCH). Anything that
//! does not start with an HTTP method is sent as a GraphQL document.

use reqwest::Method;
use serde_json::{Map, Value};

use super::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedQuery {
    Rest { method: Method, path: String },
    GraphQl { document: String },
}

impl ParsedQuery {
    pub fn parse(query: &str) -> Result<Self, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::InvalidQuery("query is empty".to_string()));
        }

        let mut parts = query.splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or_default();
        let Some(method) = parse_method(head) else {
            return Ok(ParsedQuery::GraphQl {
                document: query.to_string(),
            });
        };

        let path = parts.next().map(str::trim).unwrap_or_default();
        if !path.starts_with('/') {
            return Err(ClientError::InvalidQuery(format!(
                "route '{}' must have a path starting with '/'",
                query
            )));
        }

        Ok(ParsedQuery::Rest {
            method,
            path: path.to_string(),
        })
    }
}

fn parse_method(token: &str) -> Option<Method> {
    match token {
        "GET" => Some(Method::GET),
        "POST" => Some(Method::POST),
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// A REST path with placeholders filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedRoute {
    /// Unencoded path segments, appended to the API base URL as-is.
    pub segments: Vec<String>,
    /// Variables not consumed by the path, in key order.
    pub remaining: Map<String, Value>,
}

/// Substitute `{name}` and `:name` segments from `variables`.
pub fn expand_path(template: &str, variables: &Value) -> Result<ExpandedRoute, ClientError> {
    let mut remaining = variables.as_object().cloned().unwrap_or_default();
    let mut segments = Vec::new();

    for segment in template.trim_start_matches('/').split('/') {
        let placeholder = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .or_else(|| segment.strip_prefix(':'));

        match placeholder {
            Some(name) if !name.is_empty() => {
                let value = remaining
                    .remove(name)
                    .ok_or_else(|| ClientError::MissingVariable {
                        name: name.to_string(),
                    })?;
                segments.push(scalar_text(&value));
            }
            _ => segments.push(segment.to_string()),
        }
    }

    Ok(ExpandedRoute {
        segments,
        remaining,
    })
}

/// Render a variable as it appears in a URL.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
