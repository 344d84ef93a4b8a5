//! Keyed message table shared by the three message scopes.

use crate::core::ErrorMessage;
use dashmap::DashMap;
use std::collections::HashMap;

/// A lookup key: an optional reference plus an optional language.
type MessageKey = (Option<&'static str>, Option<String>);

/// A concurrent message table keyed by reference and language.
///
/// Every lookup is a single shard-locked read, so a run racing a mutation
/// observes either the old or the new message, never a torn one. The table
/// is not transactional across lookups.
#[derive(Debug, Default)]
pub struct MessageStore {
    entries: DashMap<MessageKey, ErrorMessage>,
}

impl MessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a message, replacing any previous one for the same key.
    pub fn set(&self, reference: Option<&'static str>, lang: Option<&str>, message: ErrorMessage) {
        self.entries
            .insert((reference, lang.map(str::to_string)), message);
    }

    /// Looks up a message.
    #[must_use]
    pub fn get(&self, reference: Option<&'static str>, lang: Option<&str>) -> Option<ErrorMessage> {
        self.entries
            .get(&(reference, lang.map(str::to_string)))
            .map(|entry| entry.value().clone())
    }

    /// Copies every message stored for a language, keyed by reference.
    #[must_use]
    pub fn entries_for(&self, lang: Option<&str>) -> HashMap<Option<&'static str>, ErrorMessage> {
        self.entries
            .iter()
            .filter(|entry| entry.key().1.as_deref() == lang)
            .map(|entry| (entry.key().0, entry.value().clone()))
            .collect()
    }

    /// Removes a message for a single language.
    pub fn delete(&self, reference: Option<&'static str>, lang: Option<&str>) {
        self.entries.remove(&(reference, lang.map(str::to_string)));
    }

    /// Removes every message stored for a reference, across languages.
    pub fn delete_reference(&self, reference: Option<&'static str>) {
        self.entries.retain(|(stored, _), _| *stored != reference);
    }

    /// Returns the number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no message is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
