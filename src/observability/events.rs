//! Observable events for kvconf
//!
//! Events are explicit and typed. Each diagnostic line written by the
//! logger names exactly one of these.

use std::fmt;

/// Observable events during schema management and config reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Schema
    /// Schema definition file loaded
    SchemaLoaded,
    /// Read attempted with no declared keys
    SchemaEmpty,
    /// Key declared
    KeyAdded,
    /// Key removed from the schema
    KeyRemoved,
    /// Key declared twice
    DuplicateKey,

    // Read lifecycle
    /// Read begins
    ReadStart,
    /// Read returned a config
    ReadComplete,
    /// Read ended in failure
    ReadFailed,

    // Line outcomes
    /// Key assigned more than once, later value kept
    DuplicateEntry,
    /// Key not declared in the schema
    UnknownKey,
    /// Value rejected by the key's validator
    FailedValidation,
    /// Line is not an assignment
    MalformedLine,

    // Completion
    /// Required key never assigned
    MissingRequiredKey,
    /// Config file could not be opened
    FileNotFound,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SchemaEmpty => "SCHEMA_EMPTY",
            Event::KeyAdded => "KEY_ADDED",
            Event::KeyRemoved => "KEY_REMOVED",
            Event::DuplicateKey => "DUPLICATE_KEY",

            Event::ReadStart => "READ_START",
            Event::ReadComplete => "READ_COMPLETE",
            Event::ReadFailed => "READ_FAILED",

            Event::DuplicateEntry => "DUPLICATE_ENTRY",
            Event::UnknownKey => "UNKNOWN_KEY",
            Event::FailedValidation => "FAILED_VALIDATION",
            Event::MalformedLine => "MALFORMED_LINE",

            Event::MissingRequiredKey => "MISSING_REQUIRED_KEY",
            Event::FileNotFound => "FILE_NOT_FOUND",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
