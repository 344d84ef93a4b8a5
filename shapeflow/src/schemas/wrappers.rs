//! Wrapper schemas: optional family and fallback.

use super::{IntoSchemaRef, Schema, SchemaRef};
use crate::core::{Config, Dataset, Describe, ErrorMessage, IssueKind};
use async_trait::async_trait;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A substitute value: fixed, or computed on every use.
#[derive(Clone)]
pub enum ValueSource {
    /// A fixed value.
    Value(Value),
    /// A value computed on demand.
    Func(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl ValueSource {
    /// Creates a computed value source.
    pub fn func<F>(func: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Func(Arc::new(func))
    }

    /// Produces the value.
    #[must_use]
    pub fn get(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Func(func) => func(),
        }
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<Value> for ValueSource {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Which absent markers a wrapper accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Absence {
    Undefined,
    Null,
    Both,
}

/// A schema that lets undefined and/or null through before its wrapped schema.
#[derive(Debug, Clone)]
pub struct OptionalSchema {
    type_name: &'static str,
    absence: Absence,
    wrapped: SchemaRef,
    default: Option<ValueSource>,
}

impl OptionalSchema {
    fn new(type_name: &'static str, absence: Absence, wrapped: SchemaRef) -> Self {
        Self {
            type_name,
            absence,
            wrapped,
            default: None,
        }
    }

    /// Sets the default substituted for an absent value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<ValueSource>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Returns the wrapped schema.
    #[must_use]
    pub fn wrapped(&self) -> &SchemaRef {
        &self.wrapped
    }

    fn is_absent(&self, value: Option<&Value>) -> bool {
        match (self.absence, value) {
            (Absence::Undefined | Absence::Both, None) => true,
            (Absence::Null | Absence::Both, Some(Value::Null)) => true,
            _ => false,
        }
    }

    /// Substitutes the default for an absent value.
    ///
    /// Returns true when the value stays absent and the run is complete.
    fn settle_absent(&self, dataset: &mut Dataset) -> bool {
        if !self.is_absent(dataset.value.as_ref()) {
            return false;
        }
        if let Some(ref default) = self.default {
            dataset.value = Some(default.get());
        }
        if self.is_absent(dataset.value.as_ref()) {
            dataset.typed = true;
            return true;
        }
        false
    }
}

impl Describe for OptionalSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        let wrapped = self
            .wrapped
            .expects()
            .unwrap_or(Cow::Borrowed("unknown"));
        let expects = match self.absence {
            Absence::Undefined => format!("({wrapped} | undefined)"),
            Absence::Null => format!("({wrapped} | null)"),
            Absence::Both => format!("({wrapped} | null | undefined)"),
        };
        Some(Cow::Owned(expects))
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.wrapped.message()
    }

    fn is_async(&self) -> bool {
        self.wrapped.is_async()
    }
}

#[async_trait]
impl Schema for OptionalSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        if !self.settle_absent(dataset) {
            self.wrapped.run(dataset, config);
        }
    }

    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        if !self.settle_absent(dataset) {
            self.wrapped.run_async(dataset, config).await;
        }
    }

    fn key_optional(&self) -> bool {
        self.absence != Absence::Null
    }

    fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(ValueSource::get)
    }
}

/// Lets undefined through; the key may be absent in objects.
#[must_use]
pub fn optional(wrapped: impl IntoSchemaRef) -> OptionalSchema {
    OptionalSchema::new("optional", Absence::Undefined, wrapped.into_ref())
}

/// Lets undefined through; the key may be absent in objects.
#[must_use]
pub fn undefinedable(wrapped: impl IntoSchemaRef) -> OptionalSchema {
    OptionalSchema::new("undefinedable", Absence::Undefined, wrapped.into_ref())
}

/// Lets null through; the key stays required in objects.
#[must_use]
pub fn nullable(wrapped: impl IntoSchemaRef) -> OptionalSchema {
    OptionalSchema::new("nullable", Absence::Null, wrapped.into_ref())
}

/// Lets null and undefined through; the key may be absent in objects.
#[must_use]
pub fn nullish(wrapped: impl IntoSchemaRef) -> OptionalSchema {
    OptionalSchema::new("nullish", Absence::Both, wrapped.into_ref())
}

/// A schema that replaces a failing result with a fallback value.
///
/// It reports the wrapped schema's type name, so object entries keep their
/// optional-family behaviour.
#[derive(Debug, Clone)]
pub struct FallbackSchema {
    wrapped: SchemaRef,
    fallback: ValueSource,
}

impl FallbackSchema {
    fn settle(&self, dataset: &mut Dataset, attempt: Dataset) {
        if attempt.has_issues() {
            tracing::trace!(schema = self.wrapped.type_name(), "Fallback substituted");
            dataset.value = Some(self.fallback.get());
            dataset.typed = true;
        } else {
            dataset.value = attempt.value;
            dataset.typed = attempt.typed;
        }
    }
}

impl Describe for FallbackSchema {
    fn kind(&self) -> IssueKind {
        IssueKind::Schema
    }

    fn type_name(&self) -> &'static str {
        self.wrapped.type_name()
    }

    fn expects(&self) -> Option<Cow<'_, str>> {
        self.wrapped.expects()
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.wrapped.message()
    }

    fn is_async(&self) -> bool {
        self.wrapped.is_async()
    }
}

#[async_trait]
impl Schema for FallbackSchema {
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let mut attempt = Dataset::new(dataset.value.take());
        self.wrapped.run(&mut attempt, config);
        self.settle(dataset, attempt);
    }

    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        let mut attempt = Dataset::new(dataset.value.take());
        self.wrapped.run_async(&mut attempt, config).await;
        self.settle(dataset, attempt);
    }

    fn key_optional(&self) -> bool {
        self.wrapped.key_optional()
    }

    fn default_value(&self) -> Option<Value> {
        self.wrapped.default_value()
    }

    fn fallback_value(&self) -> Option<Value> {
        Some(self.fallback.get())
    }
}

/// Wraps a schema with a fallback value used whenever it raises issues.
#[must_use]
pub fn fallback(wrapped: impl IntoSchemaRef, fallback: impl Into<ValueSource>) -> FallbackSchema {
    FallbackSchema {
        wrapped: wrapped.into_ref(),
        fallback: fallback.into(),
    }
}
