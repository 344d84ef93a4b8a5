//! # Shapeflow
//!
//! Composable schema validation for `serde_json` values.
//!
//! Shapeflow validates and transforms untrusted input against declared
//! shapes, producing either a typed value or a structured list of issues:
//!
//! - **Dataset threading**: one value-plus-diagnostics envelope flows through
//!   every schema and action of a run
//! - **Nested paths**: every issue records where it happened, outer to inner
//! - **Pipes**: a schema followed by validations and transformations
//! - **Sync and async**: every schema runs either way with the same results
//! - **Messages**: per-run, per-schema and stored messages with languages
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shapeflow::prelude::*;
//! use serde_json::json;
//!
//! let schema = object()
//!     .entry("email", pipe(string()).action(trim()).action(email()))
//!     .entry("age", optional(pipe(number()).action(min_value(18))));
//!
//! let result = safe_parse(&schema, json!({"email": " ada@example.com "}), None)?;
//! assert!(result.success);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod actions;
pub mod core;
pub mod errors;
pub mod messages;
pub mod methods;
pub mod observability;
pub mod pipe;
pub mod schemas;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::actions::{
        check, check_async, email, integer, length, max_length, max_value, min_length,
        min_value, non_empty, regex, to_lower_case, to_upper_case, transform, transform_async,
        trim, try_transform, Action, ActionRef,
    };
    pub use crate::core::{
        delete_global_config, get_global_config, set_global_config, Config, Dataset,
        ErrorMessage, GlobalConfig, Issue, IssueKind, PathItem, PathKey,
    };
    pub use crate::errors::{ShapeflowError, ValiError};
    pub use crate::messages::{
        delete_global_message, delete_schema_message, delete_specific_message,
        set_global_message, set_schema_message, set_specific_message,
    };
    pub use crate::methods::{
        flatten, get_default, get_dot_path, get_fallback, is, parse, parse_as, parse_async,
        safe_parse, safe_parse_async, FlatErrors, SafeParseResult,
    };
    pub use crate::pipe::{pipe, PipeSchema};
    pub use crate::schemas::{
        any, array, boolean, fallback, literal, loose_object, loose_tuple, never, null,
        nullable, nullish, number, object, object_with_rest, optional, picklist,
        strict_object, strict_tuple, string, tuple, tuple_with_rest, undefinedable, union,
        unknown, Schema, SchemaRef, ValueSource,
    };
}
