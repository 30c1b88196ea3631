//! Structured JSON logger for kvconf diagnostics
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Rendered with serde_json, one write per line
//! - Always written to stderr so diagnostics never mix with results on stdout

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Read cannot complete
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rendered log line: `event`, then `severity`, then fields by key.
#[derive(Serialize)]
struct LogLine<'a> {
    event: &'a str,
    severity: Severity,
    #[serde(flatten)]
    fields: BTreeMap<&'a str, &'a str>,
}

/// A structured logger that writes JSON lines to the diagnostic stream.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    /// Render one log line into `writer`
    pub(crate) fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = LogLine {
            event,
            severity,
            fields: fields.iter().copied().collect(),
        };

        let Ok(mut output) = serde_json::to_vec(&line) else {
            return;
        };
        output.push(b'\n');

        // One write per event; a failing diagnostic stream never fails a read
        let _ = writer.write_all(&output);
        let _ = writer.flush();
    }
}
