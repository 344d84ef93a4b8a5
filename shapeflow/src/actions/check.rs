//! Custom predicate validations.

use super::{subject, sync_misuse, Action};
use crate::core::{add_issue, Config, Dataset, Describe, ErrorMessage, IssueExtra, IssueKind};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{self, Debug};
use std::future::Future;
use std::marker::PhantomData;

/// Validates a value with a custom predicate.
pub struct CheckAction<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    func: F,
    message: Option<ErrorMessage>,
}

impl<F> CheckAction<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    /// Sets the message used for this action's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<F> Debug for CheckAction<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckAction")
            .field("message", &self.message)
            .finish()
    }
}

impl<F> Describe for CheckAction<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn kind(&self) -> IssueKind {
        IssueKind::Validation
    }

    fn type_name(&self) -> &'static str {
        "check"
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }
}

impl<F> Action for CheckAction<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn run(&self, dataset: &mut Dataset, config: &Config) {
        let Some(actual) = subject(dataset) else {
            return;
        };
        if !(self.func)(actual) {
            add_issue(self, "input", dataset, config, IssueExtra::new());
        }
    }
}

/// Requires `func` to return true for the value.
pub fn check<F>(func: F) -> CheckAction<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    CheckAction { func, message: None }
}

/// Validates a value with an async predicate.
pub struct AsyncCheckAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
{
    func: F,
    message: Option<ErrorMessage>,
    _phantom: PhantomData<fn() -> Fut>,
}

impl<F, Fut> AsyncCheckAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
{
    /// Sets the message used for this action's issues.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<F, Fut> Debug for AsyncCheckAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncCheckAction")
            .field("message", &self.message)
            .finish()
    }
}

impl<F, Fut> Describe for AsyncCheckAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
{
    fn kind(&self) -> IssueKind {
        IssueKind::Validation
    }

    fn type_name(&self) -> &'static str {
        "check"
    }

    fn message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }

    fn is_async(&self) -> bool {
        true
    }
}

#[async_trait]
impl<F, Fut> Action for AsyncCheckAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    fn run(&self, _dataset: &mut Dataset, _config: &Config) {
        sync_misuse(self.type_name())
    }

    async fn run_async(&self, dataset: &mut Dataset, config: &Config) {
        let Some(actual) = subject(dataset).cloned() else {
            return;
        };
        if !(self.func)(actual).await {
            add_issue(self, "input", dataset, config, IssueExtra::new());
        }
    }
}

/// Requires the future returned by `func` to resolve to true.
pub fn check_async<F, Fut>(func: F) -> AsyncCheckAction<F, Fut>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
{
    AsyncCheckAction {
        func,
        message: None,
        _phantom: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn typed(value: Value) -> Dataset {
        let mut dataset = Dataset::from_value(value);
        dataset.typed = true;
        dataset
    }

    #[test]
    fn test_check() {
        let action = check(|value| value.as_i64().is_some_and(|n| n % 2 == 0));
        let mut dataset = typed(json!(4));
        action.run(&mut dataset, &Config::new());
        assert!(!dataset.has_issues());

        let mut dataset = typed(json!(3));
        action.run(&mut dataset, &Config::new());
        assert_eq!(dataset.issues[0].message, "Invalid input: Received 3");
        assert_eq!(dataset.issues[0].kind, IssueKind::Validation);
    }

    #[test]
    fn test_check_message() {
        let action = check(|_| false).with_message("nope");
        let mut dataset = typed(json!(1));
        action.run(&mut dataset, &Config::new());
        assert_eq!(dataset.issues[0].message, "nope");
    }

    #[tokio::test]
    async fn test_check_async() {
        let action = check_async(|value: Value| async move { value == json!("ok") });
        assert!(action.is_async());

        let mut dataset = typed(json!("ok"));
        action.run_async(&mut dataset, &Config::new()).await;
        assert!(!dataset.has_issues());

        let mut dataset = typed(json!("no"));
        action.run_async(&mut dataset, &Config::new()).await;
        assert_eq!(dataset.issues.len(), 1);
    }

    #[test]
    #[should_panic(expected = "is async")]
    fn test_check_async_refuses_sync_run() {
        let action = check_async(|_: Value| async { true });
        let mut dataset = typed(json!(1));
        action.run(&mut dataset, &Config::new());
    }
}
