//! Entry points for running schemas.
//!
//! This module provides:
//! - `safe_parse` and `parse`, with async variants
//! - `is` for a quick yes/no check
//! - default and fallback accessors
//! - issue flattening by dot path

mod defaults;
mod flatten;
mod parse;

pub use defaults::{get_default, get_fallback};
pub use flatten::{flatten, get_dot_path, FlatErrors};
pub use parse::{
    is, parse, parse_as, parse_async, safe_parse, safe_parse_async, SafeParseResult,
};
