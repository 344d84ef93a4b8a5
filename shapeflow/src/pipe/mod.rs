//! Pipe composition.
//!
//! A pipe runs a root schema and then a sequence of actions over the same
//! dataset. It is itself a schema, so it nests anywhere a schema does.

mod integration_tests;

use crate::actions::{ActionRef, IntoActionRef};
use crate::core::{Config, Dataset, Describe, ErrorMessage, IssueKind};
use crate::schemas::{IntoSchemaRef, Schema, SchemaRef};
use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;

/// What the pipe does with the next action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Run,
    Skip,
    Stop,
}

/// Decides whether the next action may run.
///
/// A transformation never runs over a dataset that already carries issues:
/// the dataset is marked untyped and the pipe stops. Validations are skipped
/// once there are issues and either abort flag is set.
fn gate(action: &dyn Describe, dataset: &mut Dataset, config: &Config) -> Gate {
    if !dataset.has_issues() {
        return Gate::Run;
    }
    if action.kind() == IssueKind::Transformation {
        dataset.typed = false;
        tracing::trace!(
            action = action.type_name(),
            issues = dataset.issues.len(),
            "Pipe stopped before transformation"
        );
        return Gate::Stop;
    }
    if config.abort_early() || config.abort_pipe_early() {
        Gate::Skip
    } else {
        Gate::Run
    }
}

/// A root schema followed by actions.
#[derive(Debug, Clone)]
pub struct PipeSchema {
    root: SchemaRef,
    actions: Vec<ActionRef>,
}

impl PipeSchema {
    /// Appends an action.
    #[must_use]
    pub fn action(mut self, action: impl IntoActionRef) -> Self {
        self.actions.push(action.into_action_ref());
        self
    }

    /// Returns the root schema.
    #[must_use]
    pub fn root(&self) -> &SchemaRef {
        &self.root
    }

    /// Returns the actions in order.
    #[must_use]
    pub fn actions(&self) -> &[ActionRef] {
        &self.actions
    }
}

impl Describe for PipeSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        self.root.type_name()
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        self.root.expects()
    }

    fn requirement(&self) -> Option<Value> {
        self.root.requirement()
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.root.message()
    }

    fn is_async(&self) -> bool {
        self.root.is_async() || self.actions.iter().any(|action| action.is_async())
    }
}

#[async_trait]
impl Schema for PipeSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        self.root.run(dataset, config);
        for action in &self.actions {
            match gate(action.as_ref(), dataset, config) {
                Gate::Run => action.run(dataset, config),
                Gate::Skip => {}
                Gate::Stop => break,
            }
        }
    }

    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        self.root.run_async(dataset, config).await;
        for action in &self.actions {
            match gate(action.as_ref(), dataset, config) {
                Gate::Run => action.run_async(dataset, config).await,
                Gate::Skip => {}
                Gate::Stop => break,
            }
        }
    }

    fn key_optional(&self) -> bool {
        self.root.key_optional()
    }

    fn default_value(&self) -> Option<Value> {
        self.root.default_value()
    }

    fn fallback_value(&self) -> Option<Value> {
        self.root.fallback_value()
    }
}

/// Starts a pipe over `root`; add actions with [`PipeSchema::action`].
#[must_use]
pub fn pipe(root: impl IntoSchemaRef) -> PipeSchema {
    PipeSchema {
        root: root.into_ref(),
        actions: Vec::new(),
    }
}
