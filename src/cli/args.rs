//! CLI argument definitions using clap
//!
//! Commands:
//! - kvconf check --schema <schema.json> <config>
//! - kvconf get --schema <schema.json> <config> <KEY> [--as int|float|bool|string]

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// kvconf - A strict, schema-driven reader for KEY=VALUE config files
#[derive(Parser, Debug)]
#[command(name = "kvconf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that reads a config file
#[derive(Args, Debug, Clone)]
pub struct ReadArgs {
    /// Path to the schema definition (JSON)
    #[arg(long)]
    pub schema: PathBuf,

    /// Path to the config file to read
    pub config: PathBuf,

    /// Compare keys exactly instead of uppercasing them
    #[arg(long)]
    pub case_sensitive: bool,

    /// Fail at the first failing fault instead of after the full scan
    #[arg(long)]
    pub no_delay_exit: bool,
}

/// Type a value is converted to by `get`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a config file and print its values as JSON
    Check {
        #[command(flatten)]
        read: ReadArgs,
    },

    /// Print one typed value, falling back to the schema's defaults
    Get {
        #[command(flatten)]
        read: ReadArgs,

        /// Key to look up
        key: String,

        /// Conversion to apply
        #[arg(long = "as", value_enum, default_value = "string")]
        as_type: ValueType,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
