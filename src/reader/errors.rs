//! Read failure outcomes
//!
//! A read either stops at the first fault whose policy fails immediately
//! (`Aborted`), or finishes the scan and fails with everything that was
//! deferred (`Rejected`).

use std::fmt;

use thiserror::Error;

use super::fault::{Diagnostic, FaultRecord};

/// Consolidated report of a deferred failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureReport {
    /// Required keys never assigned, in key order
    pub missing_keys: Vec<String>,
    /// Deferred parse-time faults, in line order
    pub faults: Vec<FaultRecord>,
    /// Warnings emitted during the read
    pub diagnostics: Vec<Diagnostic>,
}

impl FailureReport {
    /// Total number of deferred faults, missing keys included
    pub fn fault_count(&self) -> usize {
        self.missing_keys.len() + self.faults.len()
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.missing_keys.is_empty() {
            writeln!(f, "The following required entries are missing:")?;
            for key in &self.missing_keys {
                writeln!(f, "\t{}", key)?;
            }
            writeln!(f)?;
        }

        if !self.faults.is_empty() {
            writeln!(f, "While reading the config file, the following errors occurred:")?;
            for fault in &self.faults {
                writeln!(f, "\t{}", fault)?;
            }
            writeln!(f)?;
        }

        write!(
            f,
            "Due to errors reading the config file, the program will now terminate"
        )
    }
}

/// Read failure
#[derive(Debug, Clone, Error)]
pub enum ReadError {
    /// Stopped at a fault whose policy fails immediately
    #[error("{0}")]
    Aborted(FaultRecord),

    /// Scan completed with deferred faults
    #[error("{0}")]
    Rejected(FailureReport),
}

impl ReadError {
    /// Returns true if the read stopped before the end of input
    pub fn is_immediate(&self) -> bool {
        matches!(self, ReadError::Aborted(_))
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            ReadError::Aborted(_) => "KVCONF_READ_ABORTED",
            ReadError::Rejected(_) => "KVCONF_READ_REJECTED",
        }
    }
}

/// Result type for read operations
pub type ReadResult<T> = Result<T, ReadError>;
