//! Testing utilities for shapeflow schemas.
//!
//! This module provides:
//! - Assertions over datasets and their issues
//! - A recording action for observing what a pipe runs

mod assertions;
mod mocks;

pub use assertions::{
    assert_failure, assert_issue_paths, assert_issue_types, assert_output, assert_success,
};
pub use mocks::RecordingAction;
