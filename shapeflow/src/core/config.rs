//! Run configuration and the global configuration store.

use super::Issue;
use crate::messages::MessageSnapshot;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A custom issue message: fixed text or a function of the issue.
#[derive(Clone)]
pub enum ErrorMessage {
    /// A fixed message.
    Text(String),
    /// A message computed from the issue.
    Dynamic(Arc<dyn Fn(&Issue) -> String + Send + Sync>),
}

impl ErrorMessage {
    /// Creates a message computed from the issue.
    pub fn dynamic<F>(func: F) -> Self
    where
        F: Fn(&Issue) -> String + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(func))
    }

    /// Resolves the message for an issue.
    #[must_use]
    pub fn resolve(&self, issue: &Issue) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Dynamic(func) => func(issue),
        }
    }
}

impl fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for ErrorMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ErrorMessage {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Options of a single run.
///
/// Unset fields fall back to the global configuration when the run starts
/// through one of the entry points in [`crate::methods`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Language key used to look up stored messages.
    pub lang: Option<String>,
    /// Run-level message override.
    pub message: Option<ErrorMessage>,
    /// Stop the entire validation at the first issue.
    pub abort_early: Option<bool>,
    /// Stop a pipe's actions once the pipe has an issue.
    pub abort_pipe_early: Option<bool>,
    pub(crate) messages: Option<Arc<MessageSnapshot>>,
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Sets the run-level message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the abort-early flag.
    #[must_use]
    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = Some(abort_early);
        self
    }

    /// Sets the abort-pipe-early flag.
    #[must_use]
    pub fn with_abort_pipe_early(mut self, abort_pipe_early: bool) -> Self {
        self.abort_pipe_early = Some(abort_pipe_early);
        self
    }

    /// Returns true if the run stops at the first issue.
    #[must_use]
    pub fn abort_early(&self) -> bool {
        self.abort_early.unwrap_or(false)
    }

    /// Returns true if pipes stop their actions at the first issue.
    #[must_use]
    pub fn abort_pipe_early(&self) -> bool {
        self.abort_pipe_early.unwrap_or(false)
    }
}

/// Global defaults applied to every run started through an entry point.
///
/// It carries no message; stored messages are set through
/// [`crate::messages::set_global_message`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Default language.
    pub lang: Option<String>,
    /// Default abort-early flag.
    pub abort_early: Option<bool>,
    /// Default abort-pipe-early flag.
    pub abort_pipe_early: Option<bool>,
}

static GLOBAL_CONFIG: RwLock<Option<GlobalConfig>> = parking_lot::const_rwlock(None);

/// Stores the global configuration, replacing the previous one.
pub fn set_global_config(config: GlobalConfig) {
    tracing::debug!(?config, "Global config set");
    *GLOBAL_CONFIG.write() = Some(config);
}

/// Removes the global configuration.
pub fn delete_global_config() {
    tracing::debug!("Global config deleted");
    *GLOBAL_CONFIG.write() = None;
}

/// Returns the effective configuration of a run.
///
/// Values of `config` win over the stored global configuration. The stored
/// messages of the resulting language are captured once here and used by
/// every issue of the run.
#[must_use]
pub fn get_global_config(config: Option<&Config>) -> Config {
    let store = GLOBAL_CONFIG.read().clone().unwrap_or_default();
    let run = config.cloned().unwrap_or_default();
    let lang = run.lang.or(store.lang);
    let messages = MessageSnapshot::capture(lang.as_deref());
    Config {
        lang,
        message: run.message,
        abort_early: run.abort_early.or(store.abort_early),
        abort_pipe_early: run.abort_pipe_early.or(store.abort_pipe_early),
        messages: Some(Arc::new(messages)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::IssueKind;

    fn issue() -> Issue {
        Issue {
            kind: IssueKind::Schema,
            issue_type: "number".to_string(),
            input: None,
            expected: Some("number".to_string()),
            received: "undefined".to_string(),
            message: String::new(),
            requirement: None,
            path: None,
            issues: None,
            lang: None,
            abort_early: None,
            abort_pipe_early: None,
        }
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_lang("de")
            .with_abort_early(true)
            .with_message("bad");

        assert_eq!(config.lang.as_deref(), Some("de"));
        assert!(config.abort_early());
        assert!(!config.abort_pipe_early());
        assert!(config.message.is_some());
    }

    #[test]
    fn test_error_message_resolution() {
        let text = ErrorMessage::from("fixed");
        assert_eq!(text.resolve(&issue()), "fixed");

        let dynamic = ErrorMessage::dynamic(|issue| format!("got {}", issue.received));
        assert_eq!(dynamic.resolve(&issue()), "got undefined");
    }

    #[test]
    fn test_global_config_merge() {
        set_global_config(GlobalConfig {
            lang: Some("config-test".to_string()),
            ..GlobalConfig::default()
        });

        let merged = get_global_config(None);
        assert_eq!(merged.lang.as_deref(), Some("config-test"));

        let merged = get_global_config(Some(&Config::new().with_lang("fr")));
        assert_eq!(merged.lang.as_deref(), Some("fr"));

        delete_global_config();
        assert_ne!(get_global_config(None).lang.as_deref(), Some("config-test"));
    }

    #[test]
    fn test_error_message_debug() {
        let dynamic = ErrorMessage::dynamic(|_| String::new());
        assert_eq!(format!("{dynamic:?}"), "Dynamic(..)");
    }
}
