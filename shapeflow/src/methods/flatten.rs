//! Flattening issues into messages keyed by location.

use crate::core::{Issue, PathKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Issue messages grouped by where they occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatErrors {
    /// Messages of issues without a path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Vec<String>>,
    /// Messages keyed by dot path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<BTreeMap<String, Vec<String>>>,
    /// Messages of issues whose path has no dot form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<String>>,
}

/// Returns the dot path of an issue, e.g. `users.0.email`.
///
/// Returns `None` for issues without a path.
pub fn get_dot_path(issue: &Issue) -> Option<String> {
    let path = issue.path.as_deref().filter(|path| !path.is_empty())?;
    let segments: Vec<String> = path
        .iter()
        .map(|item| match item.key {
            PathKey::Key(ref key) => key.clone(),
            PathKey::Index(index) => index.to_string(),
        })
        .collect();
    Some(segments.join("."))
}

/// Groups issue messages into root, nested and other buckets.
pub fn flatten(issues: &[Issue]) -> FlatErrors {
    let mut flat = FlatErrors::default();
    for issue in issues {
        let message = issue.message.clone();
        if issue.path.is_none() {
            flat.root.get_or_insert_with(Vec::new).push(message);
            continue;
        }
        match get_dot_path(issue) {
            Some(dot_path) => flat
                .nested
                .get_or_insert_with(BTreeMap::new)
                .entry(dot_path)
                .or_default()
                .push(message),
            None => flat.other.get_or_insert_with(Vec::new).push(message),
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, Dataset};
    use crate::schemas::{array, number, object, string, Schema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn issues_for(schema: &dyn Schema, input: serde_json::Value) -> Vec<Issue> {
        let mut dataset = Dataset::from_value(input);
        schema.run(&mut dataset, &Config::new());
        dataset.issues
    }

    #[test]
    fn test_dot_path() {
        let schema = object().entry("users", array(object().entry("email", string())));
        let issues = issues_for(&schema, json!({"users": [{"email": "a"}, {"email": 2}]}));

        assert_eq!(get_dot_path(&issues[0]).as_deref(), Some("users.1.email"));
    }

    #[test]
    fn test_root_issue_has_no_dot_path() {
        let issues = issues_for(&string(), json!(1));
        assert_eq!(get_dot_path(&issues[0]), None);
    }

    #[test]
    fn test_flatten() {
        let schema = object().entry("name", string()).entry("age", number());
        let mut issues = issues_for(&schema, json!({"name": 1, "age": "x"}));
        issues.extend(issues_for(&string(), json!(1)));

        let flat = flatten(&issues);
        assert_eq!(
            flat.root,
            Some(vec!["Invalid type: Expected string but received 1".to_string()])
        );
        let nested = flat.nested.unwrap();
        assert_eq!(nested.len(), 2);
        assert_eq!(
            nested["age"],
            vec!["Invalid type: Expected number but received \"x\"".to_string()]
        );
        assert!(flat.other.is_none());
    }

    #[test]
    fn test_flatten_empty() {
        assert_eq!(flatten(&[]), FlatErrors::default());
    }
}
