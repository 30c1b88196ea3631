//! Fault and diagnostic records produced by a read

use std::fmt;

use serde::Serialize;

use crate::observability::{Event, Severity};

/// Kinds of faults detected while reading a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Assigned key is not declared
    UnknownKey,
    /// Value does not match the key's validator
    FailedValidation,
    /// Line is not a `KEY=VALUE` assignment
    MalformedLine,
    /// Required key never assigned
    MissingRequiredKey,
    /// Config file could not be opened
    FileNotFound,
}

impl FaultKind {
    /// Returns the logger event for this kind
    pub fn event(&self) -> Event {
        match self {
            FaultKind::UnknownKey => Event::UnknownKey,
            FaultKind::FailedValidation => Event::FailedValidation,
            FaultKind::MalformedLine => Event::MalformedLine,
            FaultKind::MissingRequiredKey => Event::MissingRequiredKey,
            FaultKind::FileNotFound => Event::FileNotFound,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event().as_str())
    }
}

/// One detected fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultRecord {
    pub kind: FaultKind,
    pub message: String,
    /// 1-based source line, absent for completion and file faults
    pub line: Option<usize>,
    /// Normalized key involved, if any
    pub key: Option<String>,
}

impl FaultRecord {
    pub fn unknown_key(key: &str, line: usize) -> Self {
        Self {
            kind: FaultKind::UnknownKey,
            message: format!("Error on line {}, '{}' - Unknown key", line, key),
            line: Some(line),
            key: Some(key.to_string()),
        }
    }

    pub fn failed_validation(key: &str, value: &str, line: usize) -> Self {
        Self {
            kind: FaultKind::FailedValidation,
            message: format!(
                "Value '{}' did not pass validation for '{}' on line {}",
                value, key, line
            ),
            line: Some(line),
            key: Some(key.to_string()),
        }
    }

    pub fn malformed_line(text: &str, reason: &str, line: usize) -> Self {
        Self {
            kind: FaultKind::MalformedLine,
            message: format!("Syntax error on line {}, '{}' - {}", line, text, reason),
            line: Some(line),
            key: None,
        }
    }

    pub fn missing_required_key(key: &str) -> Self {
        Self {
            kind: FaultKind::MissingRequiredKey,
            message: format!("Missing value for '{}' is required", key),
            line: None,
            key: Some(key.to_string()),
        }
    }

    pub fn file_not_found(path: &str, reason: &str) -> Self {
        Self {
            kind: FaultKind::FileNotFound,
            message: format!("Could not open {}: {}", path, reason),
            line: None,
            key: None,
        }
    }
}

impl fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// What a diagnostic line reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A fault handled by the exit policy
    Fault(FaultKind),
    /// Key assigned more than once
    DuplicateEntry,
    /// Read attempted without a schema
    EmptySchema,
}

/// A warning or error emitted on the diagnostic stream during a read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn from_fault(fault: &FaultRecord, severity: Severity) -> Self {
        Self {
            severity,
            kind: DiagnosticKind::Fault(fault.kind),
            message: fault.message.clone(),
            line: fault.line,
        }
    }

    pub fn duplicate_entry(key: &str, previous: &str, value: &str, line: usize) -> Self {
        Self {
            severity: Severity::Warn,
            kind: DiagnosticKind::DuplicateEntry,
            message: format!(
                "value for key '{}' has multiple entries. Updating from '{}' to '{}'",
                key, previous, value
            ),
            line: Some(line),
        }
    }

    pub fn empty_schema() -> Self {
        Self {
            severity: Severity::Warn,
            kind: DiagnosticKind::EmptySchema,
            message: "No config file schema specified!".to_string(),
            line: None,
        }
    }

    /// Returns the logger event for this diagnostic
    pub fn event(&self) -> Event {
        match self.kind {
            DiagnosticKind::Fault(kind) => kind.event(),
            DiagnosticKind::DuplicateEntry => Event::DuplicateEntry,
            DiagnosticKind::EmptySchema => Event::SchemaEmpty,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
