//! Schema error types
//!
//! Error codes:
//! - KVCONF_DUPLICATE_KEY (REJECT, FATAL when the invalid-key policy fails)
//! - KVCONF_UNKNOWN_KEY (REJECT)
//! - KVCONF_INVALID_PATTERN (REJECT)
//! - KVCONF_MALFORMED_SCHEMA (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Declaration refused, schema left untouched
    Reject,
    /// Caller is expected to terminate
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Key already declared
    DuplicateKey,
    /// Key not declared
    UnknownKey,
    /// Validator pattern does not compile
    InvalidPattern,
    /// Schema definition file unreadable or invalid
    MalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::DuplicateKey => "KVCONF_DUPLICATE_KEY",
            SchemaErrorCode::UnknownKey => "KVCONF_UNKNOWN_KEY",
            SchemaErrorCode::InvalidPattern => "KVCONF_INVALID_PATTERN",
            SchemaErrorCode::MalformedSchema => "KVCONF_MALFORMED_SCHEMA",
        }
    }

    /// Returns the default severity for this code
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::MalformedSchema => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    severity: Severity,
    message: String,
    key: Option<String>,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: String, key: Option<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message,
            key,
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            SchemaErrorCode::DuplicateKey,
            format!("Specified key '{}' already in table", key),
            Some(key),
        )
    }

    /// Create an unknown key error
    pub fn unknown_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            SchemaErrorCode::UnknownKey,
            format!("Could not remove key '{}' - does not exist", key),
            Some(key),
        )
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::new(
            SchemaErrorCode::InvalidPattern,
            format!("Invalid validator pattern '{}': {}", pattern.into(), reason),
            None,
        )
    }

    /// Create an error for a malformed schema definition file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::MalformedSchema,
            format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            None,
        )
    }

    /// Escalates this error so callers treat it as terminal
    pub fn into_fatal(mut self) -> Self {
        self.severity = Severity::Fatal;
        self
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the key the error concerns, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
