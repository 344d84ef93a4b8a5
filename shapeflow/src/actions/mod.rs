//! Action trait and implementations.
//!
//! Actions refine an already-typed value: validations inspect it and may add
//! one issue, transformations replace it. An action never runs over an
//! untyped dataset, and a validation never touches `typed`.

mod check;
mod length;
mod pattern;
mod transform;
mod value;

pub use check::{check, check_async, AsyncCheckAction, CheckAction};
pub use length::{length, max_length, min_length, non_empty, LengthAction};
pub use pattern::{email, regex, RegexAction};
pub use transform::{
    to_lower_case, to_upper_case, transform, transform_async, trim, try_transform,
    AsyncTransformAction, TransformAction, TryTransformAction,
};
pub use value::{integer, max_value, min_value, IntegerAction, ValueAction};

use crate::core::{Config, Dataset, Describe};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A shared, immutable action.
pub type ActionRef = Arc<dyn Action>;

/// Trait for pipe actions.
#[async_trait]
pub trait Action: Describe {
    /// Applies the action to the dataset in place.
    ///
    /// # Panics
    ///
    /// Panics for async-only actions; use [`Action::run_async`] for those.
    fn run(&self, dataset: &mut Dataset, config: &Config);

    /// Applies the action to the dataset in place, suspending if needed.
    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        self.run(dataset, config);
    }
}

/// Conversion of concrete actions into [`ActionRef`].
pub trait IntoActionRef {
    /// Wraps the action in an `Arc`.
    fn into_action_ref(self) -> ActionRef;
}

impl<A: Action + 'static> IntoActionRef for A {
    fn into_action_ref(self) -> ActionRef {
        Arc::new(self)
    }
}

impl IntoActionRef for ActionRef {
    fn into_action_ref(self) -> ActionRef {
        self
    }
}

/// Returns the value an action may inspect.
///
/// Untyped datasets and undefined values are left to pass through.
pub(crate) fn subject(dataset: &Dataset) -> Option<&Value> {
    if dataset.typed {
        dataset.value.as_ref()
    } else {
        None
    }
}

/// Panic raised when an async-only node is driven synchronously.
#[cold]
pub(crate) fn sync_misuse(type_name: &str) -> ! {
    panic!("`{type_name}` is async; run it with `run_async` or a `*_async` entry point")
}
