//! Short diagnostic rendering of arbitrary values.

use serde_json::Value;

/// Renders a value for the `received` field of an issue.
///
/// Strings are quoted, scalars print literally and containers reduce to
/// their type tag. `None` renders as `undefined`.
#[must_use]
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(text @ Value::String(_)) => text.to_string(),
        Some(Value::Array(_)) => "Array".to_string(),
        Some(Value::Object(_)) => "Object".to_string(),
    }
}

/// Returns the type tag of a value, as used for container rendering.
#[must_use]
pub fn type_tag(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "Array",
        Some(Value::Object(_)) => "Object",
    }
}

/// Joins expectation labels with ` | `, dropping duplicates.
///
/// Multiple labels are wrapped in parentheses.
#[must_use]
pub fn join_expects(labels: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::with_capacity(labels.len());
    for label in labels {
        if !unique.contains(&label.as_str()) {
            unique.push(label);
        }
    }
    match unique.len() {
        0 => "never".to_string(),
        1 => unique[0].to_string(),
        _ => format!("({})", unique.join(" | ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify(Some(&json!("abc"))), "\"abc\"");
        assert_eq!(stringify(Some(&json!(null))), "null");
        assert_eq!(stringify(Some(&json!(true))), "true");
        assert_eq!(stringify(Some(&json!(42))), "42");
        assert_eq!(stringify(Some(&json!(1.5))), "1.5");
        assert_eq!(stringify(None), "undefined");
    }

    #[test]
    fn test_stringify_containers_use_type_tag() {
        assert_eq!(stringify(Some(&json!([1, 2]))), "Array");
        assert_eq!(stringify(Some(&json!({"a": 1}))), "Object");
    }

    #[test]
    fn test_stringify_escapes_quotes() {
        assert_eq!(stringify(Some(&json!("a\"b"))), "\"a\\\"b\"");
    }

    #[test]
    fn test_type_tag() {
        assert_eq!(type_tag(Some(&json!({}))), "Object");
        assert_eq!(type_tag(None), "undefined");
    }

    #[test]
    fn test_join_expects() {
        assert_eq!(join_expects(&["string".to_string()]), "string");
        assert_eq!(
            join_expects(&["string".to_string(), "number".to_string(), "string".to_string()]),
            "(string | number)"
        );
        assert_eq!(join_expects(&[]), "never");
    }
}
