//! Length validations for strings and arrays.

use super::{subject, Action};
use crate::core::{add_issue, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Validates the length of a string (in chars) or an array (in items).
#[derive(Clone)]
pub struct LengthAction {
    type_name: &'static str,
    expects: String,
    requirement: usize,
    accepts: fn(usize, usize) -> bool,
    message: Option<ErrorMessage>,
}

impl LengthAction {
    fn new(
        type_name: &'static str,
        expects: String,
        requirement: usize,
        accepts: fn(usize, usize) -> bool,
    ) -> Self {
        Self {
            type_name,
            expects,
            requirement,
            accepts,
            message: None,
        }
    }

    /// Sets the message used for this action's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

impl fmt::Debug for LengthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LengthAction")
            .field("type_name", &self.type_name)
            .field("requirement", &self.requirement)
            .finish()
    }
}

impl Describe for LengthAction {
    fn kind(&self) -> IssueKind {
        IssueKind::Validation
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.expects))
    }

    fn requirement(&self) -> Option<Value> {
        Some(Value::from(self.requirement))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Action for LengthAction {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(actual) = subject(dataset).and_then(measure) else {
            return;
        };
        if !(self.accepts)(actual, self.requirement) {
            let extra = IssueExtra::new().with_received(actual.to_string());
            add_issue(self, "length", dataset, config, extra);
        }
    }
}

/// Requires a length of at least `requirement`.
#[must_use]
pub fn min_length(requirement: usize) -> LengthAction {
    LengthAction::new("min_length", format!(">={requirement}"), requirement, |a, r| a >= r)
}

/// Requires a length of at most `requirement`.
#[must_use]
pub fn max_length(requirement: usize) -> LengthAction {
    LengthAction::new("max_length", format!("<={requirement}"), requirement, |a, r| a <= r)
}

/// Requires a length of exactly `requirement`.
#[must_use]
pub fn length(requirement: usize) -> LengthAction {
    LengthAction::new("length", requirement.to_string(), requirement, |a, r| a == r)
}

/// Requires a non-zero length.
#[must_use]
pub fn non_empty() -> LengthAction {
    LengthAction::new("non_empty", "!0".to_string(), 0, |a, _| a > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn typed(value: Value) -> Dataset {
        let mut dataset = Dataset::from_value(value);
        dataset.typed = true;
        dataset
    }

    #[test]
    fn test_min_length_counts_chars() {
        let mut dataset = typed(json!("héllo"));
        min_length(5).run(&mut dataset, &Config::new());
        assert!(!dataset.has_issues());

        let mut dataset = typed(json!("abc"));
        min_length(5).run(&mut dataset, &Config::new());
        let issue = &dataset.issues[0];
        assert_eq!(issue.issue_type, "min_length");
        assert_eq!(issue.received, "3");
        assert_eq!(issue.message, "Invalid length: Expected >=5 but received 3");
        assert!(dataset.typed);
    }

    #[test]
    fn test_max_length_on_array() {
        let mut dataset = typed(json!([1, 2, 3]));
        max_length(2).run(&mut dataset, &Config::new());
        assert_eq!(dataset.issues[0].expected.as_deref(), Some("<=2"));
        assert_eq!(dataset.issues[0].requirement, Some(json!(2)));
    }

    #[test]
    fn test_exact_length_and_non_empty() {
        let mut dataset = typed(json!("ab"));
        length(2).run(&mut dataset, &Config::new());
        non_empty().run(&mut dataset, &Config::new());
        assert!(!dataset.has_issues());

        let mut dataset = typed(json!(""));
        non_empty().run(&mut dataset, &Config::new());
        assert_eq!(dataset.issues[0].expected.as_deref(), Some("!0"));
    }

    #[test]
    fn test_untyped_dataset_is_skipped() {
        let mut dataset = Dataset::from_value(json!(""));
        non_empty().run(&mut dataset, &Config::new());
        assert!(!dataset.has_issues());
    }
}
