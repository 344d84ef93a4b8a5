//! Process-wide message overrides.
//!
//! Three scopes are consulted by the issue builder, most specific first:
//!
//! - **specific**: keyed by the reference (type name) of one schema or action
//! - **schema**: applies to every issue raised by a schema
//! - **global**: applies to every issue
//!
//! Each scope is keyed by language; `None` is the default slot. The tables
//! live for the whole process and change only through the explicit `set_*`
//! and `delete_*` functions below.
//!
//! Runs started through [`crate::methods`] capture a [`MessageSnapshot`] of
//! their language once, before validation begins, so every issue of that run
//! resolves against the same messages even while another thread mutates the
//! tables. Schemas run directly with a fresh [`crate::core::Config`] read the
//! live tables per issue.

mod store;

pub use store::MessageStore;

use crate::core::ErrorMessage;
use std::collections::HashMap;
use std::sync::OnceLock;

fn global_store() -> &'static MessageStore {
    static STORE: OnceLock<MessageStore> = OnceLock::new();
    STORE.get_or_init(MessageStore::new)
}

fn schema_store() -> &'static MessageStore {
    static STORE: OnceLock<MessageStore> = OnceLock::new();
    STORE.get_or_init(MessageStore::new)
}

fn specific_store() -> &'static MessageStore {
    static STORE: OnceLock<MessageStore> = OnceLock::new();
    STORE.get_or_init(MessageStore::new)
}

/// Sets the global message for a language.
pub fn set_global_message(message: impl Into<ErrorMessage>, lang: Option<&str>) {
    tracing::debug!(lang = ?lang, "Global message set");
    global_store().set(None, lang, message.into());
}

/// Returns the global message for a language.
#[must_use]
pub fn get_global_message(lang: Option<&str>) -> Option<ErrorMessage> {
    global_store().get(None, lang)
}

/// Deletes the global message for a language.
pub fn delete_global_message(lang: Option<&str>) {
    tracing::debug!(lang = ?lang, "Global message deleted");
    global_store().delete(None, lang);
}

/// Sets the schema message for a language.
pub fn set_schema_message(message: impl Into<ErrorMessage>, lang: Option<&str>) {
    tracing::debug!(lang = ?lang, "Schema message set");
    schema_store().set(None, lang, message.into());
}

/// Returns the schema message for a language.
#[must_use]
pub fn get_schema_message(lang: Option<&str>) -> Option<ErrorMessage> {
    schema_store().get(None, lang)
}

/// Deletes the schema message for a language.
pub fn delete_schema_message(lang: Option<&str>) {
    tracing::debug!(lang = ?lang, "Schema message deleted");
    schema_store().delete(None, lang);
}

/// Sets the message of one schema or action type for a language.
///
/// `reference` is the type name, e.g. `"min_length"` or `"object"`.
pub fn set_specific_message(
    reference: &'static str,
    message: impl Into<ErrorMessage>,
    lang: Option<&str>,
) {
    tracing::debug!(reference, lang = ?lang, "Specific message set");
    specific_store().set(Some(reference), lang, message.into());
}

/// Returns the message of one schema or action type for a language.
#[must_use]
pub fn get_specific_message(reference: &'static str, lang: Option<&str>) -> Option<ErrorMessage> {
    specific_store().get(Some(reference), lang)
}

/// Deletes the message of one schema or action type.
///
/// With `lang = None` every language of the reference is removed.
pub fn delete_specific_message(reference: &'static str, lang: Option<&str>) {
    tracing::debug!(reference, lang = ?lang, "Specific message deleted");
    match lang {
        Some(lang) => specific_store().delete(Some(reference), Some(lang)),
        None => specific_store().delete_reference(Some(reference)),
    }
}

/// The stored messages of one language, captured at the start of a run.
#[derive(Debug, Clone, Default)]
pub struct MessageSnapshot {
    global: Option<ErrorMessage>,
    schema: Option<ErrorMessage>,
    specific: HashMap<&'static str, ErrorMessage>,
}

impl MessageSnapshot {
    /// Captures the three scopes for `lang`.
    #[must_use]
    pub fn capture(lang: Option<&str>) -> Self {
        let specific = specific_store()
            .entries_for(lang)
            .into_iter()
            .filter_map(|(reference, message)| reference.map(|reference| (reference, message)))
            .collect();
        Self {
            global: get_global_message(lang),
            schema: get_schema_message(lang),
            specific,
        }
    }

    /// Returns the captured global message.
    #[must_use]
    pub fn global(&self) -> Option<&ErrorMessage> {
        self.global.as_ref()
    }

    /// Returns the captured schema message.
    #[must_use]
    pub fn schema(&self) -> Option<&ErrorMessage> {
        self.schema.as_ref()
    }

    /// Returns the captured message of one schema or action type.
    #[must_use]
    pub fn specific(&self, reference: &str) -> Option<&ErrorMessage> {
        self.specific.get(reference)
    }
}
