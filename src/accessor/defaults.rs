//! Fallback values for typed lookups
//!
//! Defaults are never validated against the schema and never appear in the
//! parsed value map. Only typed accessors consult them.

use std::collections::BTreeMap;

use crate::schema::KeyCase;

/// Fallback values keyed by normalized key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    case: KeyCase,
    values: BTreeMap<String, String>,
}

impl Defaults {
    pub fn new(case: KeyCase) -> Self {
        Self {
            case,
            values: BTreeMap::new(),
        }
    }

    /// Sets the fallback for `key`, returning the previous one.
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        self.values
            .insert(self.case.normalize(key), value.to_string())
    }

    /// Gets the fallback for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&self.case.normalize(key)).map(String::as_str)
    }

    /// Removes the fallback for `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(&self.case.normalize(key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
