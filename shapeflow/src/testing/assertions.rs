//! Test assertions for datasets.

use crate::core::Dataset;
use crate::methods::get_dot_path;
use serde_json::Value;

/// Asserts that the dataset is typed and carries no issue.
pub fn assert_success(dataset: &Dataset) {
    assert!(
        dataset.is_success(),
        "Expected success, got typed={} with issues: {:?}",
        dataset.typed,
        dataset.issues.iter().map(|issue| &issue.message).collect::<Vec<_>>()
    );
}

/// Asserts that the dataset carries at least one issue.
pub fn assert_failure(dataset: &Dataset) {
    assert!(
        dataset.has_issues(),
        "Expected issues, got none for value {:?}",
        dataset.value
    );
}

/// Asserts the issue types, in order.
pub fn assert_issue_types(dataset: &Dataset, expected: &[&str]) {
    let actual: Vec<&str> = dataset
        .issues
        .iter()
        .map(|issue| issue.issue_type.as_str())
        .collect();
    assert_eq!(actual, expected, "Unexpected issue types");
}

/// Asserts the dot paths of the issues, in order; root issues read as `""`.
pub fn assert_issue_paths(dataset: &Dataset, expected: &[&str]) {
    let actual: Vec<String> = dataset
        .issues
        .iter()
        .map(|issue| get_dot_path(issue).unwrap_or_default())
        .collect();
    assert_eq!(actual, expected, "Unexpected issue paths");
}

/// Asserts the output value.
pub fn assert_output(dataset: &Dataset, expected: &Value) {
    assert_eq!(
        dataset.value.as_ref(),
        Some(expected),
        "Expected output {:?}, got {:?}",
        expected,
        dataset.value
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::schemas::{number, object, string, Schema};
    use serde_json::json;

    #[test]
    fn test_assertions_on_failed_object() {
        let schema = object().entry("a", string()).entry("b", number());
        let mut dataset = Dataset::from_value(json!({"a": 1, "b": 2}));
        schema.run(&mut dataset, &Config::new());

        assert_failure(&dataset);
        assert_issue_types(&dataset, &["string"]);
        assert_issue_paths(&dataset, &["a"]);
        assert_output(&dataset, &json!({"a": 1, "b": 2}));
    }

    #[test]
    #[should_panic(expected = "Expected success")]
    fn test_assert_success_panics_on_issue() {
        let mut dataset = Dataset::from_value(json!(1));
        string().run(&mut dataset, &Config::new());
        assert_success(&dataset);
    }
}
