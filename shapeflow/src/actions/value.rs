//! Value range and integer validations.

use super::{subject, Action};
use crate::core::{
    add_issue, stringify, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind,
};
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Orders two values of the same comparable kind.
///
/// Numbers compare as `f64` and strings lexicographically; anything else is
/// incomparable.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            left.as_f64()?.partial_cmp(&right.as_f64()?)
        }
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

/// Validates a value against a lower or upper bound.
#[derive(Debug, Clone)]
pub struct ValueAction {
    type_name: &'static str,
    expects: String,
    requirement: Value,
    accepts: fn(Ordering) -> bool,
    message: Option<ErrorMessage>,
}

impl ValueAction {
    fn new(type_name: &'static str, prefix: &str, requirement: Value, accepts: fn(Ordering) -> bool) -> Self {
        Self {
            type_name,
            expects: format!("{prefix}{}", stringify::stringify(Some(&requirement))),
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

impl Describe for ValueAction {
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
        Some(self.requirement.clone())
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Action for ValueAction {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(actual) = subject(dataset) else {
            return;
        };
        let accepted = compare(actual, &self.requirement).is_some_and(self.accepts);
        if !accepted {
            add_issue(self, "value", dataset, config, IssueExtra::new());
        }
    }
}

/// Requires a value greater than or equal to `requirement`.
#[must_use]
pub fn min_value(requirement: impl Into<Value>) -> ValueAction {
    ValueAction::new("min_value", ">=", requirement.into(), Ordering::is_ge)
}

/// Requires a value less than or equal to `requirement`.
#[must_use]
pub fn max_value(requirement: impl Into<Value>) -> ValueAction {
    ValueAction::new("max_value", "<=", requirement.into(), Ordering::is_le)
}

/// Validates that a number has no fractional part.
#[derive(Debug, Clone, Default)]
pub struct IntegerAction {
    message: Option<ErrorMessage>,
}

impl IntegerAction {
    /// Sets the message used for this action's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for IntegerAction {
    fn kind(&self) -> IssueKind {
        IssueKind::Validation
    }

    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Action for IntegerAction {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(actual) = subject(dataset) else {
            return;
        };
        let integral = match actual {
            Value::Number(number) if number.is_i64() || number.is_u64() => true,
            Value::Number(number) => number.as_f64().is_some_and(|float| float.fract() == 0.0),
            _ => false,
        };
        if !integral {
            add_issue(self, "integer", dataset, config, IssueExtra::new());
        }
    }
}

/// Requires an integral number.
#[must_use]
pub fn integer() -> IntegerAction {
    IntegerAction::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(action: &dyn Action, value: Value) -> Dataset {
        let mut dataset = Dataset::from_value(value);
        dataset.typed = true;
        action.run(&mut dataset, &Config::new());
        dataset
    }

    #[test]
    fn test_min_value() {
        assert!(!apply(&min_value(18), json!(18)).has_issues());
        let dataset = apply(&min_value(18), json!(17.5));
        assert_eq!(dataset.issues[0].message, "Invalid value: Expected >=18 but received 17.5");
        assert_eq!(dataset.issues[0].requirement, Some(json!(18)));
    }

    #[test]
    fn test_max_value_on_strings() {
        assert!(!apply(&max_value("m"), json!("apple")).has_issues());
        let dataset = apply(&max_value("m"), json!("zebra"));
        assert_eq!(dataset.issues[0].expected.as_deref(), Some("<=\"m\""));
    }

    #[test]
    fn test_incomparable_values_fail() {
        let dataset = apply(&min_value(1), json!("1"));
        assert_eq!(dataset.issues.len(), 1);
    }

    #[test]
    fn test_integer() {
        assert!(!apply(&integer(), json!(3)).has_issues());
        assert!(!apply(&integer(), json!(3.0)).has_issues());
        let dataset = apply(&integer(), json!(3.5));
        assert_eq!(dataset.issues[0].message, "Invalid integer: Received 3.5");
        assert!(dataset.typed);
    }
}
