//! Running schemas against input.

use crate::core::{get_global_config, Config, Dataset, Describe, Issue};
use crate::errors::{ShapeflowError, ValiError};
use crate::observability::validation_span;
use crate::schemas::Schema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Instrument;

/// The outcome of [`safe_parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeParseResult {
    /// Whether the output has the schema's shape.
    pub typed: bool,
    /// Whether the run is typed and raised no issue.
    pub success: bool,
    /// The output value; `None` stands for undefined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// The issues, `None` when there are none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Issue>>,
}

impl SafeParseResult {
    fn from_dataset(dataset: Dataset) -> Self {
        let success = dataset.is_success();
        let Dataset {
            value,
            typed,
            issues,
        } = dataset;
        Self {
            typed,
            success,
            output: value,
            issues: if issues.is_empty() { None } else { Some(issues) },
        }
    }

    /// Converts into the output, or a validation error carrying the issues.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeflowError::Validation`] when any issue was raised.
    pub fn into_result(self) -> Result<Option<Value>, ShapeflowError> {
        match self.issues {
            Some(issues) => Err(ValiError::new(issues).into()),
            None => Ok(self.output),
        }
    }
}

fn ensure_sync(schema: &dyn Schema) -> Result<(), ShapeflowError> {
    if schema.is_async() {
        tracing::warn!(schema = schema.type_name(), "Async schema passed to a sync entry point");
        return Err(ShapeflowError::async_schema(schema.type_name()));
    }
    Ok(())
}

fn finish(operation: &'static str, schema: &dyn Schema, dataset: Dataset) -> SafeParseResult {
    tracing::debug!(
        operation,
        schema = schema.type_name(),
        typed = dataset.typed,
        issues = dataset.issues.len(),
        "Validation completed"
    );
    SafeParseResult::from_dataset(dataset)
}

/// Validates `input` against `schema` without failing on issues.
///
/// The run config is merged over the global config.
///
/// # Errors
///
/// Returns [`ShapeflowError::AsyncSchema`] when the schema must run async.
pub fn safe_parse(
    schema: &dyn Schema,
    input: impl Into<Option<Value>>,
    config: Option<&Config>,
) -> Result<SafeParseResult, ShapeflowError> {
    ensure_sync(schema)?;
    let config = get_global_config(config);
    let mut dataset = Dataset::new(input.into());
    {
        let _span = validation_span("safe_parse", schema.type_name()).entered();
        schema.run(&mut dataset, &config);
    }
    Ok(finish("safe_parse", schema, dataset))
}

/// Validates `input` against `schema`, suspending where the schema does.
pub async fn safe_parse_async(
    schema: &dyn Schema,
    input: impl Into<Option<Value>>,
    config: Option<&Config>,
) -> SafeParseResult {
    let config = get_global_config(config);
    let mut dataset = Dataset::new(input.into());
    schema
        .run_async(&mut dataset, &config)
        .instrument(validation_span("safe_parse_async", schema.type_name()))
        .await;
    finish("safe_parse_async", schema, dataset)
}

/// Validates `input` and returns the output.
///
/// # Errors
///
/// Returns [`ShapeflowError::Validation`] with every issue when validation
/// fails, or [`ShapeflowError::AsyncSchema`] for async schemas.
pub fn parse(
    schema: &dyn Schema,
    input: impl Into<Option<Value>>,
    config: Option<&Config>,
) -> Result<Option<Value>, ShapeflowError> {
    safe_parse(schema, input, config)?.into_result()
}

/// Async variant of [`parse`].
///
/// # Errors
///
/// Returns [`ShapeflowError::Validation`] with every issue when validation
/// fails.
pub async fn parse_async(
    schema: &dyn Schema,
    input: impl Into<Option<Value>>,
    config: Option<&Config>,
) -> Result<Option<Value>, ShapeflowError> {
    safe_parse_async(schema, input, config).await.into_result()
}

/// Validates `input` and deserializes the output into `T`.
///
/// An undefined output deserializes from `null`.
///
/// # Errors
///
/// Returns the errors of [`parse`], or [`ShapeflowError::Serialization`]
/// when the output does not fit `T`.
pub fn parse_as<T: DeserializeOwned>(
    schema: &dyn Schema,
    input: impl Into<Option<Value>>,
    config: Option<&Config>,
) -> Result<T, ShapeflowError> {
    let output = parse(schema, input, config)?;
    Ok(serde_json::from_value(output.unwrap_or(Value::Null))?)
}

/// Returns true if `input` satisfies `schema`.
///
/// Runs with abort-early, so it stops at the first issue. An async schema
/// is never satisfied synchronously and yields false.
pub fn is(schema: &dyn Schema, input: impl Into<Option<Value>>) -> bool {
    if ensure_sync(schema).is_err() {
        return false;
    }
    let config = get_global_config(Some(&Config::new().with_abort_early(true)));
    let mut dataset = Dataset::new(input.into());
    schema.run(&mut dataset, &config);
    !dataset.has_issues()
}
