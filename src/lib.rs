//! kvconf - A strict, schema-driven reader for KEY=VALUE config files
//!
//! Declare the keys a file may assign, a full-match pattern for each value
//! and whether each key is required; then read. Faults are warned about,
//! fail the read immediately, or are collected and fail it after the scan,
//! depending on the exit policy.
//!
//! ```ignore
//! use kvconf::reader::{ConfigReader, ExitPolicy};
//! use kvconf::accessor::TypedAccess;
//!
//! let mut reader = ConfigReader::new(ExitPolicy::default());
//! reader.add_key_pattern("HOST", "[a-z.]+", true)?;
//! reader.add_key_pattern("PORT", "[0-9]+", false)?;
//! reader.set_default("PORT", "80");
//!
//! let config = reader.read_str("host = example.com # primary\n")?;
//! assert_eq!(config.get_value_as_int("PORT")?, 80);
//! ```

pub mod accessor;
pub mod cli;
pub mod observability;
pub mod reader;
pub mod schema;

pub use accessor::TypedAccess;
pub use reader::{ConfigReader, ExitPolicy, FaultPolicy, ParsedConfig, ReadError};
pub use schema::{SchemaError, Validator};
