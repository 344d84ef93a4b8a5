//! Array schema.

use super::{
    merge_child, run_child, run_child_async, run_children_async, IntoSchemaRef, Merge, Parent,
    Schema, SchemaRef,
};
use crate::core::{
    add_issue, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind, PathItem,
};
use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;

/// Schema for arrays whose items all match one schema.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    item: SchemaRef,
    message: Option<ErrorMessage>,
}

impl ArraySchema {
    /// Sets the message used for this schema's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
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

    fn merge_item(
        dataset: &mut Dataset,
        input: &Parent<'_, [Value]>,
        output: &mut Vec<Value>,
        index: usize,
        child: Dataset,
        config: &Config,
    ) -> bool {
        let path = || PathItem::array(input.shared(), index, Some(input[index].clone()));
        match merge_child(dataset, child, path, config) {
            Merge::Continue(value) => {
                output.push(value.unwrap_or(Value::Null));
                true
            }
            Merge::Abort => false,
        }
    }
}

impl Describe for ArraySchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        "array"
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("Array"))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        self.item.is_async()
    }
}

#[async_trait]
impl Schema for ArraySchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(input) = self.begin(dataset, config) else {
            return;
        };
        let parent = Parent::new(input.as_slice());
        let mut output = Vec::with_capacity(input.len());

        for (index, value) in input.iter().enumerate() {
            let child = run_child(self.item.as_ref(), Some(value.clone()), config);
            if !Self::merge_item(dataset, &parent, &mut output, index, child, config) {
                break;
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
            for (index, value) in input.iter().enumerate() {
                let child = run_child_async(self.item.as_ref(), Some(value.clone()), config).await;
                if !Self::merge_item(dataset, &parent, &mut output, index, child, config) {
                    break;
                }
            }
        } else {
            let children = run_children_async(
                input
                    .iter()
                    .map(|value| (self.item.as_ref(), Some(value.clone())))
                    .collect::<Vec<_>>(),
                config,
            )
            .await;
            for (index, child) in children.into_iter().enumerate() {
                Self::merge_item(dataset, &parent, &mut output, index, child, config);
            }
        }

        dataset.value = Some(Value::Array(output));
    }
}

/// Creates an array schema.
#[must_use]
pub fn array(item: impl IntoSchemaRef) -> ArraySchema {
    ArraySchema {
        item: item.into_ref(),
        message: None,
    }
}
