//! Config reader subsystem
//!
//! Reads `KEY=VALUE` text line by line, validates each assignment against the
//! schema and routes every fault through the exit policy.
//!
//! # Fault handling
//!
//! - Each fault kind has its own `FaultPolicy`
//! - `Warn` logs and continues
//! - `FailImmediate` stops the read at the fault
//! - `FailDeferred` records the fault and fails after the full scan
//! - Duplicate assignments only ever warn

mod errors;
mod fault;
mod line;
mod parsed;
mod policy;
mod reader;
mod source;

pub use errors::{FailureReport, ReadError, ReadResult};
pub use fault::{Diagnostic, DiagnosticKind, FaultKind, FaultRecord};
pub use line::{classify, strip_line, LineClass, MalformedReason};
pub use parsed::ParsedConfig;
pub use policy::{ExitPolicy, FaultPolicy, PolicyFlags};
pub use reader::ConfigReader;
pub use source::Source;
