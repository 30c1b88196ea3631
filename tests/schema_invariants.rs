//! Schema Invariant Tests
//!
//! - Keys are unique after normalization
//! - Removing a key makes it unknown to later reads
//! - Update is remove-then-add
//! - Schema and parsed values share one key normalization

use kvconf::reader::{ConfigReader, DiagnosticKind, ExitPolicy, FaultKind, FaultPolicy, ReadError};
use kvconf::schema::{KeyCase, SchemaErrorCode, Validator};

// =============================================================================
// Helper Functions
// =============================================================================

fn lenient_reader(case: KeyCase) -> ConfigReader {
    ConfigReader::new(ExitPolicy::lenient(case))
}

fn digits() -> Validator {
    Validator::new("[0-9]+").unwrap()
}

// =============================================================================
// Uniqueness Tests
// =============================================================================

/// Declaring the same key twice is refused and keeps the first declaration.
#[test]
fn test_duplicate_declaration_refused() {
    let mut reader = lenient_reader(KeyCase::Insensitive);
    reader.add_key("PORT", digits(), true).unwrap();

    let err = reader
        .add_key("port", Validator::new("[a-z]+").unwrap(), false)
        .unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::DuplicateKey);
    assert!(!err.is_fatal());

    let parsed = reader.read_str("port=8080\n").unwrap();
    assert_eq!(parsed.get("PORT"), Some("8080"));
}

/// With a failing invalid-key policy, duplicate declarations are fatal.
#[test]
fn test_duplicate_declaration_fatal_under_failing_policy() {
    let policy = ExitPolicy::default().with_invalid_key(FaultPolicy::FailImmediate);
    let mut reader = ConfigReader::new(policy);
    reader.add_key("PORT", digits(), true).unwrap();

    let err = reader.add_key("PORT", digits(), true).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(reader.schema().len(), 1);
}

// =============================================================================
// Removal Tests
// =============================================================================

/// Every added key can be removed, and is unknown afterwards.
#[test]
fn test_add_then_remove_makes_key_unknown() {
    for key in ["HOST", "port", "Mixed_Case_1"] {
        let mut reader = lenient_reader(KeyCase::Insensitive);
        reader.add_key(key, Validator::new(".+").unwrap(), false).unwrap();
        reader.remove_key(&key.to_ascii_lowercase()).unwrap();

        assert!(!reader.schema().contains_key(key));

        let line = format!("{}=1\n", key);
        let parsed = reader.read_str(&line).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(
            parsed
                .diagnostics_of(DiagnosticKind::Fault(FaultKind::UnknownKey))
                .count(),
            1
        );
    }
}

/// Removing an undeclared key fails without touching the schema.
#[test]
fn test_remove_missing_key_fails() {
    let mut reader = lenient_reader(KeyCase::Insensitive);
    reader.add_key("HOST", Validator::new(".+").unwrap(), true).unwrap();

    let err = reader.remove_key("PORT").unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::UnknownKey);
    assert_eq!(reader.schema().len(), 1);
}

/// A removed required key is no longer reported missing.
#[test]
fn test_removed_required_key_not_missing() {
    let mut reader = ConfigReader::new(ExitPolicy::default());
    reader.add_key("HOST", Validator::new(".+").unwrap(), true).unwrap();
    reader.remove_key("HOST").unwrap();

    assert!(reader.read_str("").is_ok());
}

// =============================================================================
// Update Tests
// =============================================================================

/// Update swaps validator and required flag.
#[test]
fn test_update_changes_validation() {
    let mut reader = ConfigReader::new(ExitPolicy::default());
    reader.add_key("PORT", digits(), true).unwrap();
    reader.update_key_pattern("PORT", "[a-z]+", false).unwrap();

    let parsed = reader.read_str("port=http\n").unwrap();
    assert_eq!(parsed.get("PORT"), Some("http"));

    // No longer required
    assert!(reader.read_str("").is_ok());
}

/// Update of an undeclared key fails and declares nothing.
#[test]
fn test_update_requires_existing_key() {
    let mut reader = lenient_reader(KeyCase::Insensitive);
    let err = reader.update_key("PORT", digits(), true).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::UnknownKey);
    assert!(reader.schema().is_empty());
}

/// Invalid pattern strings are refused before touching the schema.
#[test]
fn test_invalid_pattern_refused() {
    let mut reader = lenient_reader(KeyCase::Insensitive);
    let err = reader.add_key_pattern("PORT", "[0-9", true).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::InvalidPattern);
    assert!(reader.schema().is_empty());
}

// =============================================================================
// Key Normalization Tests
// =============================================================================

/// With folding on, declared "Port" and file line "port" are the same key.
#[test]
fn test_case_insensitive_keys_match() {
    let mut reader = ConfigReader::new(ExitPolicy::default());
    reader.add_key("Port", digits(), true).unwrap();

    let parsed = reader.read_str("port=8080\n").unwrap();
    assert_eq!(parsed.get("PORT"), Some("8080"));
    assert_eq!(parsed.values().keys().collect::<Vec<_>>(), vec!["PORT"]);
}

/// With folding off, "Port" and "port" are different keys.
#[test]
fn test_case_sensitive_keys_do_not_match() {
    let policy = ExitPolicy::default().with_key_case(KeyCase::Sensitive);
    let mut reader = ConfigReader::new(policy);
    reader.add_key("Port", digits(), true).unwrap();

    match reader.read_str("port=8080\n") {
        Err(ReadError::Rejected(report)) => {
            assert_eq!(report.missing_keys, vec!["Port".to_string()]);
        }
        other => panic!("expected deferred failure, got {:?}", other),
    }
}
