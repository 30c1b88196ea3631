//! Schema store holding the declared keys of one reader
//!
//! Keys are unique after normalization. Declaring a key twice is refused and
//! leaves the first declaration in place.

use std::collections::BTreeMap;

use crate::observability::{log_event_with_fields, Event, Severity as LogSeverity};

use super::errors::{SchemaError, SchemaResult};
use super::types::{KeyCase, SchemaEntry, Validator};

/// In-memory registry of declared keys, ordered by normalized key.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    case: KeyCase,
    entries: BTreeMap<String, SchemaEntry>,
}

impl SchemaStore {
    /// Creates an empty store using the given key normalization.
    pub fn new(case: KeyCase) -> Self {
        Self {
            case,
            entries: BTreeMap::new(),
        }
    }

    /// Returns the key normalization rule.
    pub fn key_case(&self) -> KeyCase {
        self.case
    }

    /// Returns the stored form of `key`.
    pub fn normalize(&self, key: &str) -> String {
        self.case.normalize(key)
    }

    /// Declares a key.
    ///
    /// # Errors
    ///
    /// `KVCONF_DUPLICATE_KEY` if the normalized key is already declared.
    pub fn add(&mut self, key: &str, validator: Validator, required: bool) -> SchemaResult<()> {
        let key = self.normalize(key);

        if self.entries.contains_key(&key) {
            let err = SchemaError::duplicate_key(&key);
            log_event_with_fields(
                Event::DuplicateKey,
                LogSeverity::Error,
                &[("key", &key), ("message", err.message())],
            );
            return Err(err);
        }

        log_event_with_fields(
            Event::KeyAdded,
            LogSeverity::Trace,
            &[
                ("key", &key),
                ("pattern", validator.pattern()),
                ("required", if required { "true" } else { "false" }),
            ],
        );
        self.entries
            .insert(key.clone(), SchemaEntry::new(key, validator, required));
        Ok(())
    }

    /// Removes a declared key together with its validator and required flag.
    ///
    /// # Errors
    ///
    /// `KVCONF_UNKNOWN_KEY` if the normalized key is not declared.
    pub fn remove(&mut self, key: &str) -> SchemaResult<SchemaEntry> {
        let key = self.normalize(key);

        match self.entries.remove(&key) {
            Some(entry) => {
                log_event_with_fields(Event::KeyRemoved, LogSeverity::Trace, &[("key", &key)]);
                Ok(entry)
            }
            None => {
                let err = SchemaError::unknown_key(&key);
                log_event_with_fields(
                    Event::KeyRemoved,
                    LogSeverity::Error,
                    &[("key", &key), ("message", err.message())],
                );
                Err(err)
            }
        }
    }

    /// Replaces the declaration of an existing key (remove, then add).
    ///
    /// # Errors
    ///
    /// `KVCONF_UNKNOWN_KEY` if the key was never declared.
    pub fn update(&mut self, key: &str, validator: Validator, required: bool) -> SchemaResult<()> {
        self.remove(key)?;
        self.add(key, validator, required)
    }

    /// Gets the declaration for `key`, normalizing it first.
    pub fn get(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.get(&self.normalize(key))
    }

    /// Checks whether `key` is declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the required flag of `key`, if declared.
    pub fn is_required(&self, key: &str) -> Option<bool> {
        self.get(key).map(|entry| entry.required)
    }

    /// Returns all declared keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the declarations of required keys in order.
    pub fn required_entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.values().filter(|entry| entry.required)
    }

    /// Returns the number of declared keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Validator {
        Validator::new("[0-9]+").unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let mut store = SchemaStore::new(KeyCase::Insensitive);
        store.add("Port", digits(), true).unwrap();

        let entry = store.get("PORT").unwrap();
        assert_eq!(entry.key, "PORT");
        assert!(entry.required);
        assert!(store.contains_key("port"));
    }

    #[test]
    fn test_duplicate_add_keeps_first_entry() {
        let mut store = SchemaStore::new(KeyCase::Insensitive);
        store.add("PORT", digits(), true).unwrap();

        let err = store
            .add("port", Validator::new("[a-z]+").unwrap(), false)
            .unwrap_err();
        assert_eq!(err.code().code(), "KVCONF_DUPLICATE_KEY");
        assert!(!err.is_fatal());

        let entry = store.get("PORT").unwrap();
        assert_eq!(entry.validator.pattern(), "[0-9]+");
        assert!(entry.required);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_case_sensitive_keys_are_distinct() {
        let mut store = SchemaStore::new(KeyCase::Sensitive);
        store.add("Port", digits(), true).unwrap();
        store.add("PORT", digits(), true).unwrap();

        assert_eq!(store.len(), 2);
        assert!(!store.contains_key("port"));
    }

    #[test]
    fn test_remove_purges_key() {
        let mut store = SchemaStore::new(KeyCase::Insensitive);
        store.add("PORT", digits(), true).unwrap();

        let removed = store.remove("port").unwrap();
        assert_eq!(removed.key, "PORT");
        assert!(!store.contains_key("PORT"));
        assert_eq!(store.is_required("PORT"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_unknown_key_fails() {
        let mut store = SchemaStore::new(KeyCase::Insensitive);
        let err = store.remove("MISSING").unwrap_err();
        assert_eq!(err.code().code(), "KVCONF_UNKNOWN_KEY");
        assert_eq!(err.key(), Some("MISSING"));
    }

    #[test]
    fn test_update_replaces_declaration() {
        let mut store = SchemaStore::new(KeyCase::Insensitive);
        store.add("PORT", digits(), true).unwrap();

        store
            .update("port", Validator::new("[0-9]{2,5}").unwrap(), false)
            .unwrap();

        let entry = store.get("PORT").unwrap();
        assert_eq!(entry.validator.pattern(), "[0-9]{2,5}");
        assert!(!entry.required);
    }

    #[test]
    fn test_update_missing_key_fails() {
        let mut store = SchemaStore::new(KeyCase::Insensitive);
        let err = store.update("PORT", digits(), true).unwrap_err();
        assert_eq!(err.code().code(), "KVCONF_UNKNOWN_KEY");
        assert!(store.is_empty());
    }

    #[test]
    fn test_required_entries_in_key_order() {
        let mut store = SchemaStore::new(KeyCase::Insensitive);
        store.add("ZETA", digits(), true).unwrap();
        store.add("ALPHA", digits(), true).unwrap();
        store.add("MID", digits(), false).unwrap();

        let required: Vec<_> = store.required_entries().map(|e| e.key.as_str()).collect();
        assert_eq!(required, vec!["ALPHA", "ZETA"]);

        let all: Vec<_> = store.keys().collect();
        assert_eq!(all, vec!["ALPHA", "MID", "ZETA"]);
    }
}
