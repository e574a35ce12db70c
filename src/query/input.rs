//! Input snapshots and structural comparison.
//!
//! Callers typically build a fresh `variables` object on every render, so
//! identity says nothing about whether the inputs changed. A binder keeps
//! the last observed [`QueryInput`] and compares the next one with
//! [`deep_equal`].

use serde_json::{Map, Value};
use thiserror::Error;

/// Rejected binder inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("variables must be a JSON object, got {kind}")]
    VariablesNotObject { kind: &'static str },
}

/// Snapshot of a binder's `(query, variables)` pair.
#[derive(Debug, Clone)]
pub struct QueryInput {
    query: String,
    variables: Value,
}

impl QueryInput {
    /// Validate and snapshot the inputs.
    ///
    /// `null` variables are normalized to `{}`.
    pub fn new(query: impl Into<String>, variables: Value) -> Result<Self, InputError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(InputError::EmptyQuery);
        }

        let variables = match variables {
            Value::Null => Value::Object(Map::new()),
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(InputError::VariablesNotObject {
                    kind: kind_of(&other),
                })
            }
        };

        Ok(Self { query, variables })
    }

    /// Snapshot a query that takes no variables.
    pub fn without_variables(query: impl Into<String>) -> Result<Self, InputError> {
        Self::new(query, Value::Null)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn variables(&self) -> &Value {
        &self.variables
    }

    /// True when both the query text and the variables are structurally equal.
    pub fn same_as(&self, other: &QueryInput) -> bool {
        self.query == other.query && deep_equal(&self.variables, &other.variables)
    }
}

/// Structural equality down to primitive leaves.
///
/// - object key order is irrelevant, array order is significant
/// - numbers compare by value, so `1` equals `1.0`
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if x == y {
                return true;
            }
            match (x.as_i64(), y.as_i64(), x.as_u64(), y.as_u64()) {
                (Some(i), Some(j), _, _) => i == j,
                (_, _, Some(i), Some(j)) => i == j,
                _ => match (x.as_f64(), y.as_f64()) {
                    (Some(f), Some(g)) => f == g,
                    _ => false,
                },
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        _ => false,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
