//! Construction of issue records from failing checks.

use super::{stringify, Config, Dataset, ErrorMessage, Issue, IssueKind, PathItem};
use crate::messages::{self, MessageSnapshot};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Debug;

/// The capability set shared by schemas and actions.
///
/// The issue builder only needs this view of the node that failed.
pub trait Describe: Send + Sync + Debug {
    /// Returns the node category.
    fn kind(&self) -> IssueKind;

    /// Returns the node name, e.g. `"object"` or `"min_length"`.
    ///
    /// This name is also the reference used for specific messages.
    fn type_name(&self) -> &'static str;

    /// Returns the expected-value label, if one applies.
    fn expects(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Returns the parameter of the check, if any.
    fn requirement(&self) -> Option<Value> {
        None
    }

    /// Returns the message attached to this node.
    fn message(&self) -> Option<&ErrorMessage> {
        None
    }

    /// Returns true if the node must run asynchronously.
    fn is_async(&self) -> bool {
        false
    }
}

/// Per-call overrides for [`add_issue`].
#[derive(Debug, Clone, Default)]
pub struct IssueExtra {
    /// Overrides the offending input; the outer `None` keeps the dataset value.
    pub input: Option<Option<Value>>,
    /// Overrides the expected label.
    pub expected: Option<String>,
    /// Overrides the received label.
    pub received: Option<String>,
    /// Overrides every stored or attached message.
    pub message: Option<ErrorMessage>,
    /// Initial path of the issue.
    pub path: Option<Vec<PathItem>>,
    /// Sub-issues of attempted alternatives.
    pub issues: Option<Vec<Issue>>,
}

impl IssueExtra {
    /// Creates empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offending input.
    #[must_use]
    pub fn with_input(mut self, input: Option<Value>) -> Self {
        self.input = Some(input);
        self
    }

    /// Sets the expected label.
    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Sets the received label.
    #[must_use]
    pub fn with_received(mut self, received: impl Into<String>) -> Self {
        self.received = Some(received.into());
        self
    }

    /// Sets the message override.
    #[must_use]
    pub fn with_message(mut self, message: Option<ErrorMessage>) -> Self {
        self.message = message;
        self
    }

    /// Sets the initial path.
    #[must_use]
    pub fn with_path(mut self, path: Vec<PathItem>) -> Self {
        self.path = Some(path);
        self
    }

    /// Sets the sub-issues.
    #[must_use]
    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = Some(issues);
        self
    }
}

/// Stored messages as seen by one issue: the run's snapshot when it has one,
/// the live tables otherwise.
enum StoredMessages<'a> {
    Snapshot(&'a MessageSnapshot),
    Live(Option<&'a str>),
}

impl<'a> StoredMessages<'a> {
    fn of(config: &'a Config) -> Self {
        match config.messages.as_deref() {
            Some(snapshot) => Self::Snapshot(snapshot),
            None => Self::Live(config.lang.as_deref()),
        }
    }

    fn specific(&self, reference: &'static str) -> Option<ErrorMessage> {
        match self {
            Self::Snapshot(snapshot) => snapshot.specific(reference).cloned(),
            Self::Live(lang) => messages::get_specific_message(reference, *lang),
        }
    }

    fn schema(&self) -> Option<ErrorMessage> {
        match self {
            Self::Snapshot(snapshot) => snapshot.schema().cloned(),
            Self::Live(lang) => messages::get_schema_message(*lang),
        }
    }

    fn global(&self) -> Option<ErrorMessage> {
        match self {
            Self::Snapshot(snapshot) => snapshot.global().cloned(),
            Self::Live(lang) => messages::get_global_message(*lang),
        }
    }
}

/// Appends one issue for `context` to the dataset.
///
/// The message is resolved in this order: the per-call override, the message
/// attached to the node, the specific stored message for the node's type,
/// the stored schema message (schema issues only), the run's message, the
/// global stored message, and finally the generated default.
///
/// A schema issue clears `typed`; validation and transformation issues leave
/// it alone.
pub fn add_issue(
    context: &dyn Describe,
    label: &str,
    dataset: &mut Dataset,
    config: &Config,
    extra: IssueExtra,
) {
    let input = match extra.input {
        Some(input) => input,
        None => dataset.value.clone(),
    };
    let expected = extra
        .expected
        .or_else(|| context.expects().map(Cow::into_owned));
    let received = extra
        .received
        .unwrap_or_else(|| stringify::stringify(input.as_ref()));

    let default_message = match expected {
        Some(ref expected) => {
            format!("Invalid {label}: Expected {expected} but received {received}")
        }
        None => format!("Invalid {label}: Received {received}"),
    };

    let kind = context.kind();
    let mut issue = Issue {
        kind,
        issue_type: context.type_name().to_string(),
        input,
        expected,
        received,
        message: default_message,
        requirement: context.requirement(),
        path: extra.path,
        issues: extra.issues,
        lang: config.lang.clone(),
        abort_early: config.abort_early,
        abort_pipe_early: config.abort_pipe_early,
    };

    let is_schema = kind == IssueKind::Schema;
    let stored = StoredMessages::of(config);
    let message = extra
        .message
        .or_else(|| context.message().cloned())
        .or_else(|| stored.specific(context.type_name()))
        .or_else(|| if is_schema { stored.schema() } else { None })
        .or_else(|| config.message.clone())
        .or_else(|| stored.global());

    if let Some(message) = message {
        issue.message = message.resolve(&issue);
    }

    tracing::trace!(
        issue_type = %issue.issue_type,
        kind = %issue.kind,
        path_len = issue.path.as_ref().map_or(0, Vec::len),
        "Issue added"
    );

    if is_schema {
        dataset.typed = false;
    }
    dataset.push_issue(issue);
}
