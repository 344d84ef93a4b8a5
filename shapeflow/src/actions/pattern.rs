//! Pattern validations for strings.

use super::{subject, Action};
use crate::core::{add_issue, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind};
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str =
    r"^[\w+-]+(?:\.[\w+-]+)*@[\da-zA-Z]+(?:[.-][\da-zA-Z]+)*\.[a-zA-Z]{2,}$";

/// Validates a string against a regular expression.
#[derive(Debug, Clone)]
pub struct RegexAction {
    type_name: &'static str,
    label: &'static str,
    expects: Option<String>,
    pattern: Regex,
    message: Option<ErrorMessage>,
}

impl RegexAction {
    /// Sets the message used for this action's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Describe for RegexAction {
    fn kind(&self) -> IssueKind {
        IssueKind::Validation
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        self.expects.as_deref().map(Cow::Borrowed)
    }

    fn requirement(&self) -> Option<Value> {
        Some(Value::String(self.pattern.as_str().to_string()))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl Action for RegexAction {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(actual) = subject(dataset) else {
            return;
        };
        let matched = actual
            .as_str()
            .is_some_and(|text| self.pattern.is_match(text));
        if !matched {
            add_issue(self, self.label, dataset, config, IssueExtra::new());
        }
    }
}

/// Requires a string matching `pattern`.
#[must_use]
pub fn regex(pattern: Regex) -> RegexAction {
    RegexAction {
        type_name: "regex",
        label: "format",
        expects: Some(format!("/{}/", pattern.as_str())),
        pattern,
        message: None,
    }
}

/// Requires a string shaped like an email address.
#[must_use]
pub fn email() -> RegexAction {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    let pattern = EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
        .clone();
    RegexAction {
        type_name: "email",
        label: "email",
        expects: None,
        pattern,
        message: None,
    }
}
