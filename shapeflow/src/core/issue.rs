//! Issue and path item types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The category of a node, copied onto every issue it raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Root type mismatch raised by a schema.
    Schema,
    /// A content check failed on an already typed value.
    Validation,
    /// A transformation step reported a problem.
    Transformation,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema"),
            Self::Validation => write!(f, "validation"),
            Self::Transformation => write!(f, "transformation"),
        }
    }
}

/// The container type a path item steps through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathItemType {
    /// An object key.
    Object,
    /// An array or tuple index.
    Array,
}

/// Whether the failure concerns the key itself or the value behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathOrigin {
    /// The key is missing or not allowed.
    Key,
    /// The value at the key failed.
    Value,
}

/// The key of a path item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathKey {
    /// A property name.
    Key(String),
    /// An array index.
    Index(usize),
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathKey {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// One step in an issue's location trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// The container type.
    #[serde(rename = "type")]
    pub kind: PathItemType,
    /// Key or value origin.
    pub origin: PathOrigin,
    /// The parent container at this level, shared by every item of one run.
    pub input: Arc<Value>,
    /// The property name or index.
    pub key: PathKey,
    /// The value at the key, `None` when the key is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PathItem {
    /// Creates an object path item with value origin.
    #[must_use]
    pub fn object(input: impl Into<Arc<Value>>, key: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            kind: PathItemType::Object,
            origin: PathOrigin::Value,
            input: input.into(),
            key: PathKey::Key(key.into()),
            value,
        }
    }

    /// Creates an array path item with value origin.
    #[must_use]
    pub fn array(input: impl Into<Arc<Value>>, index: usize, value: Option<Value>) -> Self {
        Self {
            kind: PathItemType::Array,
            origin: PathOrigin::Value,
            input: input.into(),
            key: PathKey::Index(index),
            value,
        }
    }

    /// Switches the origin to `key`.
    #[must_use]
    pub fn with_key_origin(mut self) -> Self {
        self.origin = PathOrigin::Key;
        self
    }
}

/// A single structured diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Schema, validation or transformation.
    pub kind: IssueKind,
    /// The schema or action name, e.g. `min_length`.
    #[serde(rename = "type")]
    pub issue_type: String,
    /// The offending value, `None` when it was undefined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    /// Description of the constraint.
    pub expected: Option<String>,
    /// Description of what was found.
    pub received: String,
    /// Resolved human readable text.
    pub message: String,
    /// The parameter of the check, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Value>,
    /// Outer-to-inner location of the issue; `None` at the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathItem>>,
    /// Sub-issues of the attempted union options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Issue>>,
    /// Language of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Abort-early flag of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_early: Option<bool>,
    /// Abort-pipe-early flag of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_pipe_early: Option<bool>,
}

impl Issue {
    /// Prepends a path item, keeping the path ordered outer to inner.
    pub fn prepend_path(&mut self, item: PathItem) {
        match self.path {
            Some(ref mut path) => path.insert(0, item),
            None => self.path = Some(vec![item]),
        }
    }

    /// Returns the path keys, outer to inner.
    #[must_use]
    pub fn path_keys(&self) -> Vec<&PathKey> {
        self.path
            .as_deref()
            .map(|path| path.iter().map(|item| &item.key).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
