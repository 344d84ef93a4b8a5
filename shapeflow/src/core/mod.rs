//! Core model of a validation run.
//!
//! This module contains the types every schema and action shares:
//! - the [`Dataset`] envelope threaded through a run
//! - [`Issue`] and [`PathItem`] diagnostics
//! - run [`Config`] and the global configuration store
//! - the issue builder and the value stringifier

mod config;
mod dataset;
mod issue;
mod issue_builder;
pub mod stringify;

pub use config::{
    delete_global_config, get_global_config, set_global_config, Config, ErrorMessage,
    GlobalConfig,
};
pub use dataset::Dataset;
pub use issue::{Issue, IssueKind, PathItem, PathItemType, PathKey, PathOrigin};
pub use issue_builder::{add_issue, Describe, IssueExtra};
