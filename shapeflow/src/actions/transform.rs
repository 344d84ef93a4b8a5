//! Transformations.

use super::{sync_misuse, Action};
use crate::core::{add_issue, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{self, Debug};
use std::future::Future;
use std::marker::PhantomData;

/// Takes the value out of a typed dataset for replacement.
fn take_subject(dataset: &mut Dataset) -> Option<Value> {
    if dataset.typed {
        dataset.value.take()
    } else {
        None
    }
}

/// Replaces the value with the result of a function.
pub struct TransformAction<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    type_name: &'static str,
    func: F,
}

impl<F> Debug for TransformAction<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformAction")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl<F> Describe for TransformAction<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn kind(&self) -> IssueKind {
        IssueKind::Transformation
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<F> Action for TransformAction<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn run(&self, dataset: &mut Dataset, _config: &Config) {
        if let Some(value) = take_subject(dataset) {
            dataset.value = Some((self.func)(value));
        }
    }
}

/// Replaces the value with `func(value)`.
pub fn transform<F>(func: F) -> TransformAction<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    TransformAction {
        type_name: "transform",
        func,
    }
}

fn map_text(
    type_name: &'static str,
    map: fn(&str) -> String,
) -> TransformAction<impl Fn(Value) -> Value + Send + Sync> {
    TransformAction {
        type_name,
        func: move |value: Value| -> Value {
            match value {
                Value::String(text) => Value::String(map(&text)),
                other => other,
            }
        },
    }
}

/// Removes leading and trailing whitespace from a string.
pub fn trim() -> TransformAction<impl Fn(Value) -> Value + Send + Sync> {
    map_text("trim", |text| text.trim().to_string())
}

/// Lowercases a string.
pub fn to_lower_case() -> TransformAction<impl Fn(Value) -> Value + Send + Sync> {
    map_text("to_lower_case", str::to_lowercase)
}

/// Uppercases a string.
pub fn to_upper_case() -> TransformAction<impl Fn(Value) -> Value + Send + Sync> {
    map_text("to_upper_case", str::to_uppercase)
}

/// Replaces the value with the result of a fallible function.
///
/// A failure raises a transformation issue carrying the error text and
/// leaves the original value in place.
pub struct TryTransformAction<F>
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync,
{
    func: F,
    message: Option<ErrorMessage>,
}

impl<F> TryTransformAction<F>
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync,
{
    /// Sets the message used for this action's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<F> Debug for TryTransformAction<F>
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryTransformAction")
            .field("message", &self.message)
            .finish()
    }
}

impl<F> Describe for TryTransformAction<F>
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync,
{
    fn kind(&self) -> IssueKind {
        IssueKind::Transformation
    }

    fn type_name(&self) -> &'static str {
        "try_transform"
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl<F> Action for TryTransformAction<F>
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync,
{
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        if !dataset.typed {
            return;
        }
        let Some(ref value) = dataset.value else {
            return;
        };
        match (self.func)(value) {
            Ok(output) => dataset.value = Some(output),
            Err(reason) => {
                let extra = IssueExtra::new().with_expected(reason);
                add_issue(self, "transformation", dataset, config, extra);
            }
        }
    }
}

/// Replaces the value with `func(&value)`, raising an issue on `Err`.
pub fn try_transform<F>(func: F) -> TryTransformAction<F>
where
    F: Fn(&Value) -> Result<Value, String> + Send + Sync,
{
    TryTransformAction { func, message: None }
}

/// Replaces the value with the output of an async function.
pub struct AsyncTransformAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Value> + Send,
{
    func: F,
    _phantom: PhantomData<fn() -> Fut>,
}

impl<F, Fut> Debug for AsyncTransformAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Value> + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTransformAction").finish_non_exhaustive()
    }
}

impl<F, Fut> Describe for AsyncTransformAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Value> + Send,
{
    fn kind(&self) -> IssueKind {
        IssueKind::Transformation
    }

    fn type_name(&self) -> &'static str {
        "transform"
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl<F, Fut> Action for AsyncTransformAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Value> + Send + 'static,
{
    fn run(&self, _dataset: &mut Dataset, _config: &Config) {
        sync_misuse(self.type_name())
    }

    async fn run_async(&self, dataset: &mut Dataset, _config: &Config) {
        if let Some(value) = take_subject(dataset) {
            dataset.value = Some((self.func)(value).await);
        }
    }
}

/// Replaces the value with the output of `func(value)`.
pub fn transform_async<F, Fut>(func: F) -> AsyncTransformAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Value> + Send,
{
    AsyncTransformAction {
        func,
        _phantom: PhantomData,
    }
}
