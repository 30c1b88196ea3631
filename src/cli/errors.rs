//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::fmt;
use std::io;

use crate::accessor::AccessorError;
use crate::reader::ReadError;
use crate::schema::SchemaError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Schema file unusable
    SchemaError,
    /// Config file failed validation
    ReadFailed,
    /// Typed lookup failed
    LookupFailed,
    /// I/O error (stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::SchemaError => "KVCONF_CLI_SCHEMA_ERROR",
            Self::ReadFailed => "KVCONF_CLI_READ_FAILED",
            Self::LookupFailed => "KVCONF_CLI_LOOKUP_FAILED",
            Self::IoError => "KVCONF_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, e.to_string())
    }
}

impl From<ReadError> for CliError {
    fn from(e: ReadError) -> Self {
        // Deferred failures start their report on a fresh line
        let message = match &e {
            ReadError::Aborted(fault) => fault.to_string(),
            ReadError::Rejected(report) => format!("\n{}", report),
        };
        Self::new(CliErrorCode::ReadFailed, message)
    }
}

impl From<AccessorError> for CliError {
    fn from(e: AccessorError) -> Self {
        Self::new(CliErrorCode::LookupFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
