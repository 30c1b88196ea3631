//! Schema subsystem for kvconf
//!
//! A schema declares which keys a config file may assign, the pattern each
//! value must fully match, and which keys are required.
//!
//! # Design Principles
//!
//! - Keys are unique after normalization
//! - Duplicate declarations are refused, never overwritten
//! - Validation is full-string and deterministic
//! - Schema and parsed values share one key normalization

mod errors;
mod loader;
mod store;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use loader::{KeyDef, SchemaFile};
pub use store::SchemaStore;
pub use types::{KeyCase, SchemaEntry, Validator};
pub use validator::{SchemaValidator, Verdict};
