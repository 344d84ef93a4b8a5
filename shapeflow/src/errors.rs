//! Error types for shapeflow.
//!
//! Issues raised during a run are data on the [`Dataset`](crate::core::Dataset),
//! not errors. The types here cover the entry points that turn a failed run
//! into a `Result`, and misuse of the sync API.

use crate::core::Issue;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for shapeflow operations.
#[derive(Debug, Error)]
pub enum ShapeflowError {
    /// The input did not satisfy the schema.
    #[error("{0}")]
    Validation(#[from] ValiError),

    /// A schema containing async-only nodes was run synchronously.
    #[error("Schema '{type_name}' contains async actions; use the async entry point")]
    AsyncSchema {
        /// Type name of the offending root schema.
        type_name: String,
    },

    /// The validated output could not be converted into the target type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShapeflowError {
    /// Creates an async-schema error.
    #[must_use]
    pub fn async_schema(type_name: impl Into<String>) -> Self {
        Self::AsyncSchema {
            type_name: type_name.into(),
        }
    }

    /// Returns the validation issues, if this is a validation error.
    #[must_use]
    pub fn issues(&self) -> Option<&[Issue]> {
        match self {
            Self::Validation(err) => Some(&err.issues),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ShapeflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A failed validation, carrying every issue of the run.
///
/// Displays as the message of the first issue.
#[derive(Debug, Clone, Error)]
#[error("{}", first_message(issues))]
pub struct ValiError {
    /// The issues, in the order they were raised.
    pub issues: Vec<Issue>,
}

fn first_message(issues: &[Issue]) -> &str {
    issues.first().map_or("Validation failed", |issue| issue.message.as_str())
}

impl ValiError {
    /// Creates a validation error from issues.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        map.insert("message".to_string(), Value::String(self.to_string()));
        map.insert(
            "issues".to_string(),
            serde_json::to_value(&self.issues).unwrap_or(Value::Null),
        );
        map
    }
}
