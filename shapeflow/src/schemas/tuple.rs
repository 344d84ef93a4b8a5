//! Tuple schemas: plain, loose, strict and with-rest variants.

use super::{
    merge_child, run_child, run_child_async, run_children_async, IntoSchemaRef, Merge, Parent,
    RestPolicy, Schema, SchemaRef,
};
use crate::core::{
    add_issue, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind, PathItem,
};
use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;

/// Schema for fixed-position arrays.
///
/// A slot past the end of the input is validated as undefined; when its
/// schema accepts that, the output holds `null` at that position.
#[derive(Debug, Clone)]
pub struct TupleSchema {
    type_name: &'static str,
    items: Vec<SchemaRef>,
    rest: RestPolicy,
    message: Option<ErrorMessage>,
}

impl TupleSchema {
    fn with_policy(type_name: &'static str, rest: RestPolicy) -> Self {
        Self {
            type_name,
            items: Vec::new(),
            rest,
            message: None,
        }
    }

    /// Appends an item schema.
    #[must_use]
    pub fn item(mut self, schema: impl IntoSchemaRef) -> Self {
        self.items.push(schema.into_ref());
        self
    }

    /// Sets the message used for this schema's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the number of declared items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no item is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn begin(&self, dataset: &mut Dataset, config: &Config) -> Option<Vec<Value>> {
        match dataset.value.take() {
            Some(Value::Array(input)) => {
                dataset.typed = true;
                Some(input)
            }
            other => {
                dataset.value = other;
                add_issue(self, "type", dataset, config, IssueExtra::new());
                None
            }
        }
    }

    /// Merges one validated slot. Returns false when the run must stop.
    fn merge_slot(
        dataset: &mut Dataset,
        input: &Parent<'_, [Value]>,
        output: &mut Vec<Value>,
        index: usize,
        child: Dataset,
        config: &Config,
    ) -> bool {
        let path = || PathItem::array(input.shared(), index, input.get(index).cloned());
        match merge_child(dataset, child, path, config) {
            Merge::Continue(value) => {
                output.push(value.unwrap_or(Value::Null));
                true
            }
            Merge::Abort => false,
        }
    }

    fn excess(&self, input: &[Value]) -> std::ops::Range<usize> {
        self.items.len().min(input.len())..input.len()
    }

    fn finish_static(
        &self,
        dataset: &mut Dataset,
        input: &Parent<'_, [Value]>,
        output: &mut Vec<Value>,
        config: &Config,
    ) {
        match self.rest {
            RestPolicy::Strip | RestPolicy::Schema(_) => {}
            RestPolicy::Passthrough => {
                output.extend(input[self.excess(input)].iter().cloned());
            }
            RestPolicy::Strict => {
                for index in self.excess(input) {
                    let extra = IssueExtra::new()
                        .with_input(Some(input[index].clone()))
                        .with_expected("never")
                        .with_path(vec![PathItem::array(
                            input.shared(),
                            index,
                            Some(input[index].clone()),
                        )]);
                    add_issue(self, "type", dataset, config, extra);
                    if config.abort_early() {
                        break;
                    }
                }
            }
        }
    }

    fn stopped(dataset: &Dataset, config: &Config) -> bool {
        dataset.has_issues() && config.abort_early()
    }
}

impl Describe for TupleSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("Array"))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        self.items.iter().any(|schema| schema.is_async()) || self.rest.is_async()
    }
}

#[async_trait]
impl Schema for TupleSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(input) = self.begin(dataset, config) else {
            return;
        };
        let parent = Parent::new(input.as_slice());
        let mut output = Vec::with_capacity(input.len());

        for (index, schema) in self.items.iter().enumerate() {
            let child = run_child(schema.as_ref(), input.get(index).cloned(), config);
            if !Self::merge_slot(dataset, &parent, &mut output, index, child, config) {
                break;
            }
        }

        if !Self::stopped(dataset, config) {
            self.finish_static(dataset, &parent, &mut output, config);
            if let RestPolicy::Schema(ref rest) = self.rest {
                for index in self.excess(&input) {
                    let child = run_child(rest.as_ref(), Some(input[index].clone()), config);
                    if !Self::merge_slot(dataset, &parent, &mut output, index, child, config) {
                        break;
                    }
                }
            }
        }

        dataset.value = Some(Value::Array(output));
    }

    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        let Some(input) = self.begin(dataset, config) else {
            return;
        };
        let parent = Parent::new(input.as_slice());
        let mut output = Vec::with_capacity(input.len());

        if config.abort_early() {
            for (index, schema) in self.items.iter().enumerate() {
                let child = run_child_async(schema.as_ref(), input.get(index).cloned(), config).await;
                if !Self::merge_slot(dataset, &parent, &mut output, index, child, config) {
                    break;
                }
            }
        } else {
            let children = run_children_async(
                self.items
                    .iter()
                    .enumerate()
                    .map(|(index, schema)| (schema.as_ref(), input.get(index).cloned()))
                    .collect::<Vec<_>>(),
                config,
            )
            .await;
            for (index, child) in children.into_iter().enumerate() {
                Self::merge_slot(dataset, &parent, &mut output, index, child, config);
            }
        }

        if !Self::stopped(dataset, config) {
            self.finish_static(dataset, &parent, &mut output, config);
            if let RestPolicy::Schema(ref rest) = self.rest {
                let excess = self.excess(&input);
                if config.abort_early() {
                    for index in excess {
                        let child =
                            run_child_async(rest.as_ref(), Some(input[index].clone()), config).await;
                        if !Self::merge_slot(dataset, &parent, &mut output, index, child, config) {
                            break;
                        }
                    }
                } else {
                    let children = run_children_async(
                        excess
                            .clone()
                            .map(|index| (rest.as_ref(), Some(input[index].clone())))
                            .collect::<Vec<_>>(),
                        config,
                    )
                    .await;
                    for (index, child) in excess.zip(children) {
                        Self::merge_slot(dataset, &parent, &mut output, index, child, config);
                    }
                }
            }
        }

        dataset.value = Some(Value::Array(output));
    }
}

/// Creates a tuple schema that drops extra items.
#[must_use]
pub fn tuple() -> TupleSchema {
    TupleSchema::with_policy("tuple", RestPolicy::Strip)
}

/// Creates a tuple schema that keeps extra items unchanged.
#[must_use]
pub fn loose_tuple() -> TupleSchema {
    TupleSchema::with_policy("loose_tuple", RestPolicy::Passthrough)
}

/// Creates a tuple schema that raises an issue per extra item.
#[must_use]
pub fn strict_tuple() -> TupleSchema {
    TupleSchema::with_policy("strict_tuple", RestPolicy::Strict)
}

/// Creates a tuple schema that validates extra items against `rest`.
#[must_use]
pub fn tuple_with_rest(rest: impl IntoSchemaRef) -> TupleSchema {
    TupleSchema::with_policy("tuple_with_rest", RestPolicy::Schema(rest.into_ref()))
}
