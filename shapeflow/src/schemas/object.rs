//! Object schemas: plain, loose, strict and with-rest variants.

use super::{
    merge_child, run_child, run_child_async, run_children_async, IntoSchemaRef, Merge, Parent,
    RestPolicy, Schema, SchemaRef,
};
use crate::core::{
    add_issue, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind, PathItem,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// What to do for one declared entry, decided before any validation runs.
enum EntryStep {
    /// Validate the present value or the computed default.
    Validate(Value),
    /// Substitute the fallback of an absent entry.
    Fallback(Value),
    /// Raise a missing-key issue.
    MissingKey,
    /// Leave the optional entry absent.
    Skip,
}

/// What happened for one declared entry.
enum EntryOutcome {
    Validated { value: Value, dataset: Dataset },
    Fallback(Value),
    MissingKey,
    Skip,
}

/// Schema for objects with declared entries.
///
/// Entries are validated in declaration order. Unknown keys are handled by
/// the [`RestPolicy`] of the variant.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    type_name: &'static str,
    entries: Vec<(String, SchemaRef)>,
    rest: RestPolicy,
    message: Option<ErrorMessage>,
}

impl ObjectSchema {
    fn with_policy(type_name: &'static str, rest: RestPolicy) -> Self {
        Self {
            type_name,
            entries: Vec::new(),
            rest,
            message: None,
        }
    }

    /// Adds an entry; redeclaring a key replaces its schema in place.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, schema: impl IntoSchemaRef) -> Self {
        let key = key.into();
        let schema = schema.into_ref();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = schema,
            None => self.entries.push((key, schema)),
        }
        self
    }

    /// Adds several entries in order.
    #[must_use]
    pub fn entries<I, K>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        entries
            .into_iter()
            .fold(self, |schema, (key, entry)| schema.entry(key, entry))
    }

    /// Sets the message used for this schema's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the declared keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    fn is_declared(&self, key: &str) -> bool {
        self.entries.iter().any(|(declared, _)| declared == key)
    }

    /// Checks the root shape; on success returns the input map.
    fn begin(&self, dataset: &mut Dataset, config: &Config) -> Option<Map<String, Value>> {
        match dataset.value.take() {
            Some(Value::Object(input)) => {
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

    fn plan(input: &Map<String, Value>, key: &str, schema: &dyn Schema) -> EntryStep {
        if let Some(value) = input.get(key) {
            return EntryStep::Validate(value.clone());
        }
        if schema.key_optional() {
            if let Some(default) = schema.default_value() {
                return EntryStep::Validate(default);
            }
        }
        if let Some(fallback) = schema.fallback_value() {
            return EntryStep::Fallback(fallback);
        }
        if schema.key_optional() {
            EntryStep::Skip
        } else {
            EntryStep::MissingKey
        }
    }

    /// Applies one entry outcome. Returns false when the run must stop.
    fn merge_entry(
        &self,
        dataset: &mut Dataset,
        input: &Parent<'_, Map<String, Value>>,
        output: &mut Map<String, Value>,
        key: &str,
        outcome: EntryOutcome,
        config: &Config,
    ) -> bool {
        match outcome {
            EntryOutcome::Validated { value, dataset: child } => {
                let path = || PathItem::object(input.shared(), key, Some(value));
                match merge_child(dataset, child, path, config) {
                    Merge::Continue(Some(output_value)) => {
                        output.insert(key.to_string(), output_value);
                        true
                    }
                    Merge::Continue(None) => true,
                    Merge::Abort => false,
                }
            }
            EntryOutcome::Fallback(value) => {
                output.insert(key.to_string(), value);
                true
            }
            EntryOutcome::MissingKey => {
                let extra = IssueExtra::new()
                    .with_input(None)
                    .with_expected(format!("\"{key}\""))
                    .with_path(vec![PathItem::object(input.shared(), key, None).with_key_origin()]);
                add_issue(self, "key", dataset, config, extra);
                !config.abort_early()
            }
            EntryOutcome::Skip => true,
        }
    }

    fn unknown_entries<'a>(
        &'a self,
        input: &'a Map<String, Value>,
    ) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        input.iter().filter(|(key, _)| !self.is_declared(key))
    }

    /// Applies the unknown-key policy of the variants without a rest schema.
    fn finish_static(
        &self,
        dataset: &mut Dataset,
        input: &Parent<'_, Map<String, Value>>,
        output: &mut Map<String, Value>,
        config: &Config,
    ) {
        match self.rest {
            RestPolicy::Strip | RestPolicy::Schema(_) => {}
            RestPolicy::Passthrough => {
                for (key, value) in self.unknown_entries(input) {
                    output.insert(key.clone(), value.clone());
                }
            }
            RestPolicy::Strict => {
                for (key, value) in self.unknown_entries(input) {
                    let extra = IssueExtra::new()
                        .with_input(Some(Value::String(key.clone())))
                        .with_expected("never")
                        .with_path(vec![PathItem::object(
                            input.shared(),
                            key.as_str(),
                            Some(value.clone()),
                        )
                        .with_key_origin()]);
                    add_issue(self, "key", dataset, config, extra);
                    if config.abort_early() {
                        break;
                    }
                }
            }
        }
    }

    fn merge_rest(
        dataset: &mut Dataset,
        input: &Parent<'_, Map<String, Value>>,
        output: &mut Map<String, Value>,
        key: &str,
        value: &Value,
        child: Dataset,
        config: &Config,
    ) -> bool {
        let path = || PathItem::object(input.shared(), key, Some(value.clone()));
        match merge_child(dataset, child, path, config) {
            Merge::Continue(Some(output_value)) => {
                output.insert(key.to_string(), output_value);
                true
            }
            Merge::Continue(None) => true,
            Merge::Abort => false,
        }
    }

    fn stopped(dataset: &Dataset, config: &Config) -> bool {
        dataset.has_issues() && config.abort_early()
    }
}

impl Describe for ObjectSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("Object"))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        self.entries.iter().any(|(_, schema)| schema.is_async()) || self.rest.is_async()
    }
}

#[async_trait]
impl Schema for ObjectSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(input) = self.begin(dataset, config) else {
            return;
        };
        let parent = Parent::new(&input);
        let mut output = Map::new();

        for (key, schema) in &self.entries {
            let outcome = match Self::plan(&input, key, schema.as_ref()) {
                EntryStep::Validate(value) => {
                    let child = run_child(schema.as_ref(), Some(value.clone()), config);
                    EntryOutcome::Validated { value, dataset: child }
                }
                EntryStep::Fallback(value) => EntryOutcome::Fallback(value),
                EntryStep::MissingKey => EntryOutcome::MissingKey,
                EntryStep::Skip => EntryOutcome::Skip,
            };
            if !self.merge_entry(dataset, &parent, &mut output, key, outcome, config) {
                break;
            }
        }

        if !Self::stopped(dataset, config) {
            self.finish_static(dataset, &parent, &mut output, config);
            if let RestPolicy::Schema(ref rest) = self.rest {
                for (key, value) in self.unknown_entries(&input) {
                    let child = run_child(rest.as_ref(), Some(value.clone()), config);
                    if !Self::merge_rest(dataset, &parent, &mut output, key, value, child, config) {
                        break;
                    }
                }
            }
        }

        dataset.value = Some(Value::Object(output));
    }

    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        let Some(input) = self.begin(dataset, config) else {
            return;
        };
        let parent = Parent::new(&input);
        let mut output = Map::new();

        if config.abort_early() {
            for (key, schema) in &self.entries {
                let outcome = match Self::plan(&input, key, schema.as_ref()) {
                    EntryStep::Validate(value) => {
                        let child =
                            run_child_async(schema.as_ref(), Some(value.clone()), config).await;
                        EntryOutcome::Validated { value, dataset: child }
                    }
                    EntryStep::Fallback(value) => EntryOutcome::Fallback(value),
                    EntryStep::MissingKey => EntryOutcome::MissingKey,
                    EntryStep::Skip => EntryOutcome::Skip,
                };
                if !self.merge_entry(dataset, &parent, &mut output, key, outcome, config) {
                    break;
                }
            }
        } else {
            let steps: Vec<EntryStep> = self
                .entries
                .iter()
                .map(|(key, schema)| Self::plan(&input, key, schema.as_ref()))
                .collect();
            let mut children = run_children_async(
                self.entries
                    .iter()
                    .zip(&steps)
                    .filter_map(|((_, schema), step)| match step {
                        EntryStep::Validate(value) => Some((schema.as_ref(), Some(value.clone()))),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
                config,
            )
            .await
            .into_iter();

            for ((key, _), step) in self.entries.iter().zip(steps) {
                let outcome = match step {
                    EntryStep::Validate(value) => match children.next() {
                        Some(child) => EntryOutcome::Validated { value, dataset: child },
                        None => break,
                    },
                    EntryStep::Fallback(value) => EntryOutcome::Fallback(value),
                    EntryStep::MissingKey => EntryOutcome::MissingKey,
                    EntryStep::Skip => EntryOutcome::Skip,
                };
                if !self.merge_entry(dataset, &parent, &mut output, key, outcome, config) {
                    break;
                }
            }
        }

        if !Self::stopped(dataset, config) {
            self.finish_static(dataset, &parent, &mut output, config);
            if let RestPolicy::Schema(ref rest) = self.rest {
                let unknown: Vec<(&String, &Value)> = self.unknown_entries(&input).collect();
                if config.abort_early() {
                    for (key, value) in unknown {
                        let child = run_child_async(rest.as_ref(), Some(value.clone()), config).await;
                        if !Self::merge_rest(dataset, &parent, &mut output, key, value, child, config) {
                            break;
                        }
                    }
                } else {
                    let children = run_children_async(
                        unknown
                            .iter()
                            .map(|(_, value)| (rest.as_ref(), Some((*value).clone())))
                            .collect::<Vec<_>>(),
                        config,
                    )
                    .await;
                    for ((key, value), child) in unknown.into_iter().zip(children) {
                        Self::merge_rest(dataset, &parent, &mut output, key, value, child, config);
                    }
                }
            }
        }

        dataset.value = Some(Value::Object(output));
    }
}

/// Creates an object schema that drops unknown keys.
#[must_use]
pub fn object() -> ObjectSchema {
    ObjectSchema::with_policy("object", RestPolicy::Strip)
}

/// Creates an object schema that keeps unknown keys unchanged.
#[must_use]
pub fn loose_object() -> ObjectSchema {
    ObjectSchema::with_policy("loose_object", RestPolicy::Passthrough)
}

/// Creates an object schema that raises an issue per unknown key.
#[must_use]
pub fn strict_object() -> ObjectSchema {
    ObjectSchema::with_policy("strict_object", RestPolicy::Strict)
}

/// Creates an object schema that validates unknown keys against `rest`.
#[must_use]
pub fn object_with_rest(rest: impl IntoSchemaRef) -> ObjectSchema {
    ObjectSchema::with_policy("object_with_rest", RestPolicy::Schema(rest.into_ref()))
}
