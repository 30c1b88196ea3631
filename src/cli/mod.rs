//! CLI module for kvconf
//!
//! Provides command-line interface for:
//! - check: validate a config file and print its values
//! - get: print one typed value

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ReadArgs, ValueType};
pub use commands::{build_reader, check, get, load, lookup, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_values};
