//! Schema validator for parsed assignments
//!
//! Validation semantics:
//! - The key is normalized with the store's rule before lookup
//! - Undeclared keys are rejected
//! - Values must match the key's validator in full
//!
//! The validator only classifies an assignment. Committing the value and
//! applying failure policy is the reader's job.

use super::store::SchemaStore;

/// Outcome of checking one assignment against the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Value accepted for the normalized key
    Accepted { key: String },
    /// Key is not declared
    UnknownKey { key: String },
    /// Value does not match the key's validator
    Rejected { key: String, required: bool },
}

impl Verdict {
    /// Returns the normalized key the verdict concerns
    pub fn key(&self) -> &str {
        match self {
            Verdict::Accepted { key }
            | Verdict::UnknownKey { key }
            | Verdict::Rejected { key, .. } => key,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Schema validator backed by a schema store.
///
/// Validation is deterministic and never mutates the store.
pub struct SchemaValidator<'a> {
    store: &'a SchemaStore,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator backed by the given store.
    pub fn new(store: &'a SchemaStore) -> Self {
        Self { store }
    }

    /// Checks one `key=value` assignment.
    pub fn validate_entry(&self, key: &str, value: &str) -> Verdict {
        let key = self.store.normalize(key);

        match self.store.get(&key) {
            None => Verdict::UnknownKey { key },
            Some(entry) if entry.validator.is_match(value) => Verdict::Accepted { key },
            Some(entry) => Verdict::Rejected {
                required: entry.required,
                key,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{KeyCase, Validator};

    fn setup_store(case: KeyCase) -> SchemaStore {
        let mut store = SchemaStore::new(case);
        store
            .add("HOST", Validator::new("[a-z.]+").unwrap(), true)
            .unwrap();
        store
            .add("PORT", Validator::new("[0-9]+").unwrap(), false)
            .unwrap();
        store
    }

    #[test]
    fn test_valid_entry_accepted() {
        let store = setup_store(KeyCase::Insensitive);
        let validator = SchemaValidator::new(&store);

        let verdict = validator.validate_entry("host", "example.com");
        assert_eq!(
            verdict,
            Verdict::Accepted {
                key: "HOST".into()
            }
        );
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_unknown_key() {
        let store = setup_store(KeyCase::Insensitive);
        let validator = SchemaValidator::new(&store);

        let verdict = validator.validate_entry("extra", "1");
        assert_eq!(
            verdict,
            Verdict::UnknownKey {
                key: "EXTRA".into()
            }
        );
    }

    #[test]
    fn test_rejected_value_reports_required_flag() {
        let store = setup_store(KeyCase::Insensitive);
        let validator = SchemaValidator::new(&store);

        assert_eq!(
            validator.validate_entry("port", "notanumber"),
            Verdict::Rejected {
                key: "PORT".into(),
                required: false
            }
        );
        assert_eq!(
            validator.validate_entry("host", "EXAMPLE"),
            Verdict::Rejected {
                key: "HOST".into(),
                required: true
            }
        );
    }

    #[test]
    fn test_partial_match_is_rejected() {
        let store = setup_store(KeyCase::Insensitive);
        let validator = SchemaValidator::new(&store);

        assert!(!validator.validate_entry("PORT", "80a").is_accepted());
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let store = setup_store(KeyCase::Sensitive);
        let validator = SchemaValidator::new(&store);

        let verdict = validator.validate_entry("host", "example.com");
        assert_eq!(verdict.key(), "host");
        assert!(matches!(verdict, Verdict::UnknownKey { .. }));
    }
}
