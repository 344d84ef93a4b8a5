//! Union schema.

use super::{adopt, run_child, run_child_async, IntoSchemaRef, Schema, SchemaRef};
use crate::core::{
    add_issue, stringify, Config, Dataset, Describe, ErrorMessage, Issue, IssueExtra, IssueKind,
};
use async_trait::async_trait;
use std::borrow::Cow;

/// Attempts collected while trying the options in order.
#[derive(Default)]
struct Attempts {
    valid: Option<Dataset>,
    typed: Vec<Dataset>,
    untyped: Vec<Dataset>,
}

impl Attempts {
    /// Records one attempt. Returns true once a clean option is found.
    fn record(&mut self, attempt: Dataset) -> bool {
        if attempt.typed && !attempt.has_issues() {
            self.valid = Some(attempt);
            true
        } else if attempt.typed {
            self.typed.push(attempt);
            false
        } else {
            self.untyped.push(attempt);
            false
        }
    }
}

/// Schema accepting a value that matches any of its options.
///
/// Options are tried in declaration order and the first clean one wins. When
/// none is clean, a single typed or single untyped attempt is adopted as is;
/// otherwise one `union` issue carries the sub-issues of every attempt.
#[derive(Debug, Clone, Default)]
pub struct UnionSchema {
    options: Vec<SchemaRef>,
    message: Option<ErrorMessage>,
}

impl UnionSchema {
    /// Appends an option.
    #[must_use]
    pub fn option(mut self, schema: impl IntoSchemaRef) -> Self {
        self.options.push(schema.into_ref());
        self
    }

    /// Sets the message used for this schema's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the options in order.
    #[must_use]
    pub fn options(&self) -> &[SchemaRef] {
        &self.options
    }

    fn settle(&self, dataset: &mut Dataset, attempts: Attempts, config: &Config) {
        let Attempts {
            valid,
            mut typed,
            mut untyped,
        } = attempts;

        if let Some(valid) = valid {
            adopt(dataset, valid);
            return;
        }

        if !typed.is_empty() {
            if typed.len() == 1 {
                if let Some(only) = typed.pop() {
                    adopt(dataset, only);
                }
                return;
            }
            let extra = IssueExtra::new().with_issues(sub_issues(typed));
            add_issue(self, "type", dataset, config, extra);
            dataset.typed = true;
            return;
        }

        if untyped.len() == 1 {
            if let Some(only) = untyped.pop() {
                adopt(dataset, only);
            }
            return;
        }
        let extra = IssueExtra::new().with_issues(sub_issues(untyped));
        add_issue(self, "type", dataset, config, extra);
    }
}

fn sub_issues(attempts: Vec<Dataset>) -> Vec<Issue> {
    attempts.into_iter().flat_map(|attempt| attempt.issues).collect()
}

impl Describe for UnionSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        "union"
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        let labels: Vec<String> = self
            .options
            .iter()
            .map(|option| {
                option
                    .expects()
                    .map_or_else(|| "unknown".to_string(), Cow::into_owned)
            })
            .collect();
        Some(Cow::Owned(stringify::join_expects(&labels)))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        self.options.iter().any(|option| option.is_async())
    }
}

#[async_trait]
impl Schema for UnionSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let mut attempts = Attempts::default();
        for option in &self.options {
            let attempt = run_child(option.as_ref(), dataset.value.clone(), config);
            if attempts.record(attempt) {
                break;
            }
        }
        self.settle(dataset, attempts, config);
    }

    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        let mut attempts = Attempts::default();
        for option in &self.options {
            let attempt = run_child_async(option.as_ref(), dataset.value.clone(), config).await;
            if attempts.record(attempt) {
                break;
            }
        }
        self.settle(dataset, attempts, config);
    }
}

/// Creates an empty union; add options with [`UnionSchema::option`].
#[must_use]
pub fn union() -> UnionSchema {
    UnionSchema::default()
}
