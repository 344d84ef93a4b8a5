//! Leaf schemas: primitives, literals and picklists.

use super::Schema;
use crate::core::{add_issue, stringify, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// A schema accepting every value a predicate accepts.
#[derive(Clone)]
pub struct PrimitiveSchema {
    type_name: &'static str,
    expects: &'static str,
    accepts: fn(Option<&Value>) -> bool,
    message: Option<ErrorMessage>,
}

impl PrimitiveSchema {
    /// Creates a primitive schema.
    #[must_use]
    pub fn new(
        type_name: &'static str,
        expects: &'static str,
        accepts: fn(Option<&Value>) -> bool,
    ) -> Self {
        Self {
            type_name,
            expects,
            accepts,
            message: None,
        }
    }

    /// Sets the message used for this schema's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Debug for PrimitiveSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveSchema")
            .field("type_name", &self.type_name)
            .field("message", &self.message)
            .finish()
    }
}

impl Describe for PrimitiveSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.expects))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Schema for PrimitiveSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        if (self.accepts)(dataset.value.as_ref()) {
            dataset.typed = true;
        } else {
            add_issue(self, "type", dataset, config, IssueExtra::new());
        }
    }
}

/// Creates a string schema.
#[must_use]
pub fn string() -> PrimitiveSchema {
    PrimitiveSchema::new("string", "string", |value| matches!(value, Some(Value::String(_))))
}

/// Creates a number schema.
#[must_use]
pub fn number() -> PrimitiveSchema {
    PrimitiveSchema::new("number", "number", |value| matches!(value, Some(Value::Number(_))))
}

/// Creates a boolean schema.
#[must_use]
pub fn boolean() -> PrimitiveSchema {
    PrimitiveSchema::new("boolean", "boolean", |value| matches!(value, Some(Value::Bool(_))))
}

/// Creates a null schema.
#[must_use]
pub fn null() -> PrimitiveSchema {
    PrimitiveSchema::new("null", "null", |value| matches!(value, Some(Value::Null)))
}

/// Creates a schema accepting anything, including undefined.
#[must_use]
pub fn any() -> PrimitiveSchema {
    PrimitiveSchema::new("any", "any", |_| true)
}

/// Creates a schema accepting anything, including undefined.
#[must_use]
pub fn unknown() -> PrimitiveSchema {
    PrimitiveSchema::new("unknown", "unknown", |_| true)
}

/// Creates a schema rejecting everything.
#[must_use]
pub fn never() -> PrimitiveSchema {
    PrimitiveSchema::new("never", "never", |_| false)
}

/// A schema accepting exactly one value.
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    literal: Value,
    expects: String,
    message: Option<ErrorMessage>,
}

impl LiteralSchema {
    /// Sets the message used for this schema's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Describe for LiteralSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        "literal"
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.expects))
    }

    fn requirement(&self) -> Option<Value> {
        Some(self.literal.clone())
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Schema for LiteralSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        if dataset.value.as_ref() == Some(&self.literal) {
            dataset.typed = true;
        } else {
            add_issue(self, "type", dataset, config, IssueExtra::new());
        }
    }
}

/// Creates a schema accepting exactly `literal`.
#[must_use]
pub fn literal(literal: impl Into<Value>) -> LiteralSchema {
    let literal = literal.into();
    LiteralSchema {
        expects: stringify::stringify(Some(&literal)),
        literal,
        message: None,
    }
}

/// A schema accepting one of a fixed set of values.
#[derive(Debug, Clone)]
pub struct PicklistSchema {
    options: Vec<Value>,
    expects: String,
    message: Option<ErrorMessage>,
}

impl PicklistSchema {
    /// Sets the message used for this schema's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the accepted options.
    #[must_use]
    pub fn options(&self) -> &[Value] {
        &self.options
    }
}

impl Describe for PicklistSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        "picklist"
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.expects))
    }

    fn requirement(&self) -> Option<Value> {
        Some(Value::Array(self.options.clone()))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Schema for PicklistSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let accepted = dataset
            .value
            .as_ref()
            .is_some_and(|value| self.options.contains(value));
        if accepted {
            dataset.typed = true;
        } else {
            add_issue(self, "type", dataset, config, IssueExtra::new());
        }
    }
}

/// Creates a schema accepting one of `options`.
#[must_use]
pub fn picklist<I, V>(options: I) -> PicklistSchema
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let options: Vec<Value> = options.into_iter().map(Into::into).collect();
    let labels: Vec<String> = options
        .iter()
        .map(|option| stringify::stringify(Some(option)))
        .collect();
    PicklistSchema {
        expects: stringify::join_expects(&labels),
        options,
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(schema: &dyn Schema, value: Option<Value>) -> Dataset {
        let mut dataset = Dataset::new(value);
        schema.run(&mut dataset, &Config::new());
        dataset
    }

    #[test]
    fn test_string_accepts_strings() {
        let dataset = run(&string(), Some(json!("hello")));
        assert!(dataset.typed);
        assert!(!dataset.has_issues());
        assert_eq!(dataset.value, Some(json!("hello")));
    }

    #[test]
    fn test_string_rejects_number() {
        let dataset = run(&string(), Some(json!(5)));
        assert!(!dataset.typed);
        assert_eq!(dataset.issues.len(), 1);
        let issue = &dataset.issues[0];
        assert_eq!(issue.issue_type, "string");
        assert_eq!(issue.message, "Invalid type: Expected string but received 5");
    }

    #[test]
    fn test_number_rejects_text() {
        let dataset = run(&number(), Some(json!("not a number")));
        assert!(!dataset.typed);
        assert_eq!(
            dataset.issues[0].message,
            "Invalid type: Expected number but received \"not a number\""
        );
    }

    #[test]
    fn test_boolean_and_null() {
        assert!(run(&boolean(), Some(json!(false))).typed);
        assert!(!run(&boolean(), Some(json!(0))).typed);
        assert!(run(&null(), Some(json!(null))).typed);
        assert!(!run(&null(), None).typed);
    }

    #[test]
    fn test_any_unknown_never() {
        assert!(run(&any(), None).typed);
        assert!(run(&unknown(), Some(json!({"a": 1}))).typed);
        let dataset = run(&never(), Some(json!(1)));
        assert!(!dataset.typed);
        assert_eq!(dataset.issues[0].expected.as_deref(), Some("never"));
    }

    #[test]
    fn test_undefined_is_received_as_undefined() {
        let dataset = run(&string(), None);
        assert_eq!(dataset.issues[0].received, "undefined");
    }

    #[test]
    fn test_attached_message() {
        let dataset = run(&string().with_message("must be text"), Some(json!(1)));
        assert_eq!(dataset.issues[0].message, "must be text");
    }

    #[test]
    fn test_literal() {
        let schema = literal("admin");
        assert!(run(&schema, Some(json!("admin"))).typed);

        let dataset = run(&schema, Some(json!("user")));
        assert!(!dataset.typed);
        assert_eq!(
            dataset.issues[0].message,
            "Invalid type: Expected \"admin\" but received \"user\""
        );
    }

    #[test]
    fn test_picklist() {
        let schema = picklist(["red", "green"]);
        assert!(run(&schema, Some(json!("green"))).typed);

        let dataset = run(&schema, Some(json!("blue")));
        assert_eq!(
            dataset.issues[0].expected.as_deref(),
            Some("(\"red\" | \"green\")")
        );
        assert_eq!(schema.options().len(), 2);
    }
}
