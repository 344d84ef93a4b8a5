//! The value-plus-diagnostics envelope threaded through a run.

use super::Issue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The dataset threaded through every schema and action of a run.
///
/// A dataset is created fresh per run and mutated in place by each stage.
/// `issues` is append-only, and once a schema clears `typed` nothing later
/// in the same run sets it again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// The current value; `None` stands for undefined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Whether a schema confirmed the value's shape.
    #[serde(default)]
    pub typed: bool,

    /// Issues collected so far.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl Dataset {
    /// Creates an untyped dataset around a raw input.
    #[must_use]
    pub fn new(value: Option<Value>) -> Self {
        Self {
            value,
            typed: false,
            issues: Vec::new(),
        }
    }

    /// Creates an untyped dataset around a present value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self::new(Some(value))
    }

    /// Creates an untyped dataset holding undefined.
    #[must_use]
    pub fn undefined() -> Self {
        Self::new(None)
    }

    /// Returns true if any issue was recorded.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Returns the issues, or `None` when there are none.
    #[must_use]
    pub fn issues(&self) -> Option<&[Issue]> {
        if self.issues.is_empty() {
            None
        } else {
            Some(&self.issues)
        }
    }

    /// Returns true when the value is typed and carries no issues.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.typed && self.issues.is_empty()
    }

    /// Appends an issue.
    pub fn push_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Moves the issues of a child dataset into this one.
    pub fn extend_issues(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Splits the dataset into the value and the collected issues.
    ///
    /// # Errors
    ///
    /// Returns the issues when any were recorded.
    pub fn into_result(self) -> Result<Option<Value>, Vec<Issue>> {
        if self.issues.is_empty() {
            Ok(self.value)
        } else {
            Err(self.issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IssueKind;
    use serde_json::json;

    fn issue() -> Issue {
        Issue {
            kind: IssueKind::Validation,
            issue_type: "min_value".to_string(),
            input: Some(json!(-5)),
            expected: Some(">=0".to_string()),
            received: "-5".to_string(),
            message: "Invalid value".to_string(),
            requirement: Some(json!(0)),
            path: None,
            issues: None,
            lang: None,
            abort_early: None,
            abort_pipe_early: None,
        }
    }

    #[test]
    fn test_new_dataset_is_untyped_and_clean() {
        let dataset = Dataset::from_value(json!("x"));
        assert!(!dataset.typed);
        assert!(!dataset.has_issues());
        assert!(dataset.issues().is_none());
        assert!(!dataset.is_success());
    }

    #[test]
    fn test_undefined_dataset() {
        let dataset = Dataset::undefined();
        assert!(dataset.value.is_none());
    }

    #[test]
    fn test_typed_dataset_with_issue() {
        let mut dataset = Dataset::from_value(json!(-5));
        dataset.typed = true;
        dataset.push_issue(issue());

        assert!(dataset.typed);
        assert_eq!(dataset.issues().map(<[Issue]>::len), Some(1));
        assert!(!dataset.is_success());
    }

    #[test]
    fn test_into_result() {
        let mut dataset = Dataset::from_value(json!(1));
        dataset.typed = true;
        assert_eq!(dataset.clone().into_result(), Ok(Some(json!(1))));

        dataset.push_issue(issue());
        assert!(dataset.into_result().is_err());
    }

    #[test]
    fn test_serialization_omits_empty_issues() {
        let mut dataset = Dataset::from_value(json!({"id": 5}));
        dataset.typed = true;

        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json, json!({"value": {"id": 5}, "typed": true}));
    }
}
