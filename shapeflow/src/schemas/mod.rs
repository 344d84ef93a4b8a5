//! Schema trait and implementations.
//!
//! A schema establishes the shape of a value. On a root mismatch it raises a
//! single schema issue, which clears `typed`, and stops. On a match it sets
//! `typed` and, for composite shapes, recurses into its children, merging
//! their issues with a path item prepended.

mod array;
mod object;
mod object_tests;
mod primitives;
mod tuple;
mod union;
mod wrappers;

pub use array::{array, ArraySchema};
pub use object::{loose_object, object, object_with_rest, strict_object, ObjectSchema};
pub use primitives::{
    any, boolean, literal, never, null, number, picklist, string, unknown, LiteralSchema,
    PicklistSchema, PrimitiveSchema,
};
pub use tuple::{loose_tuple, strict_tuple, tuple, tuple_with_rest, TupleSchema};
pub use union::{union, UnionSchema};
pub use wrappers::{
    fallback, nullable, nullish, optional, undefinedable, FallbackSchema, OptionalSchema,
    ValueSource,
};

use crate::core::{Config, Dataset, Describe, Issue, PathItem};
use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{Map, Value};
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

/// A shared, immutable schema.
pub type SchemaRef = Arc<dyn Schema>;

/// Trait for type-establishing validators.
///
/// Schemas are built once and reused across any number of runs; all run
/// state lives in the [`Dataset`].
#[async_trait]
pub trait Schema: Describe {
    /// Validates the dataset in place.
    ///
    /// # Panics
    ///
    /// Panics when the schema contains an async-only action; use
    /// [`Schema::run_async`] for those.
    fn run(&self, dataset: &mut Dataset, config: &Config);

    /// Validates the dataset in place, suspending where children do.
    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        self.run(dataset, config);
    }

    /// Returns true if an object entry with this schema may be absent.
    fn key_optional(&self) -> bool {
        false
    }

    /// Returns the default substituted for an absent value.
    fn default_value(&self) -> Option<Value> {
        None
    }

    /// Returns the value substituted when validation fails.
    fn fallback_value(&self) -> Option<Value> {
        None
    }
}

/// Conversion of concrete schemas into [`SchemaRef`].
pub trait IntoSchemaRef {
    /// Wraps the schema in an `Arc`.
    fn into_ref(self) -> SchemaRef;
}

impl<S: Schema + 'static> IntoSchemaRef for S {
    fn into_ref(self) -> SchemaRef {
        Arc::new(self)
    }
}

impl IntoSchemaRef for SchemaRef {
    fn into_ref(self) -> SchemaRef {
        self
    }
}

/// Unknown key or rest item policy of composite schemas.
#[derive(Debug, Clone)]
pub enum RestPolicy {
    /// Drop unknown entries silently.
    Strip,
    /// Copy unknown entries into the output unchanged.
    Passthrough,
    /// Raise one issue per unknown entry.
    Strict,
    /// Validate every unknown entry against a schema.
    Schema(SchemaRef),
}

impl RestPolicy {
    fn is_async(&self) -> bool {
        matches!(self, Self::Schema(schema) if schema.is_async())
    }
}

/// The input container of one composite run.
///
/// The `Value` that path items point at is built on first use and then
/// shared, so a run with many issues copies its input at most once.
pub(crate) struct Parent<'a, T: ?Sized> {
    input: &'a T,
    shared: OnceLock<Arc<Value>>,
}

impl<'a, T: ?Sized> Parent<'a, T> {
    pub(crate) fn new(input: &'a T) -> Self {
        Self {
            input,
            shared: OnceLock::new(),
        }
    }

    fn shared_with(&self, build: impl FnOnce(&T) -> Value) -> Arc<Value> {
        Arc::clone(self.shared.get_or_init(|| Arc::new(build(self.input))))
    }
}

impl Parent<'_, Map<String, Value>> {
    pub(crate) fn shared(&self) -> Arc<Value> {
        self.shared_with(|input| Value::Object(input.clone()))
    }
}

impl Parent<'_, [Value]> {
    pub(crate) fn shared(&self) -> Arc<Value> {
        self.shared_with(|input| Value::Array(input.to_vec()))
    }
}

impl<T: ?Sized> Deref for Parent<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.input
    }
}

/// Outcome of merging a child dataset into its parent.
pub(crate) enum Merge {
    /// Keep going; carries the child's output value.
    Continue(Option<Value>),
    /// Abort-early was triggered.
    Abort,
}

/// Merges a child dataset into its parent.
///
/// Child issues get `path_item` prepended before they are appended to the
/// parent. An untyped child makes the parent untyped. With abort-early, the
/// first child issue stops the parent.
pub(crate) fn merge_child(
    parent: &mut Dataset,
    child: Dataset,
    path_item: impl FnOnce() -> PathItem,
    config: &Config,
) -> Merge {
    let Dataset {
        value,
        typed,
        issues,
    } = child;

    if !issues.is_empty() {
        let item = path_item();
        parent.extend_issues(issues.into_iter().map(|mut issue: Issue| {
            issue.prepend_path(item.clone());
            issue
        }));
        if config.abort_early() {
            parent.typed = false;
            return Merge::Abort;
        }
    }
    if !typed {
        parent.typed = false;
    }
    Merge::Continue(value)
}

/// Runs one child validation synchronously on a fresh dataset.
pub(crate) fn run_child(schema: &dyn Schema, value: Option<Value>, config: &Config) -> Dataset {
    let mut dataset = Dataset::new(value);
    schema.run(&mut dataset, config);
    dataset
}

/// Runs one child validation asynchronously on a fresh dataset.
pub(crate) async fn run_child_async(
    schema: &dyn Schema,
    value: Option<Value>,
    config: &Config,
) -> Dataset {
    let mut dataset = Dataset::new(value);
    schema.run_async(&mut dataset, config).await;
    dataset
}

/// Runs child validations concurrently.
///
/// The results come back in input order regardless of completion order.
pub(crate) async fn run_children_async<'a, I>(children: I, config: &Config) -> Vec<Dataset>
where
    I: IntoIterator<Item = (&'a dyn Schema, Option<Value>)>,
{
    join_all(
        children
            .into_iter()
            .map(|(schema, value)| run_child_async(schema, value, config)),
    )
    .await
}

/// Moves the outcome of an alternative attempt into the dataset.
pub(crate) fn adopt(dataset: &mut Dataset, attempt: Dataset) {
    dataset.value = attempt.value;
    dataset.typed = attempt.typed;
    dataset.extend_issues(attempt.issues);
}
