//! CLI command implementations
//!
//! Commands build a reader from the schema file, read the config once and
//! print the result. All failures surface as `CliError`; only `main` exits.

use serde_json::{json, Value};

use crate::accessor::TypedAccess;
use crate::reader::{ConfigReader, ParsedConfig};
use crate::schema::{KeyCase, SchemaFile};

use super::args::{Command, ReadArgs, ValueType};
use super::errors::CliResult;
use super::io::{write_json, write_values};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { read } => check(&read),
        Command::Get { read, key, as_type } => get(&read, &key, as_type),
    }
}

/// Validate a config file and print its values
pub fn check(args: &ReadArgs) -> CliResult<()> {
    let parsed = load(args)?;
    write_values(parsed.values())
}

/// Print one typed value
pub fn get(args: &ReadArgs, key: &str, as_type: ValueType) -> CliResult<()> {
    let parsed = load(args)?;
    write_json(&lookup(&parsed, key, as_type)?)
}

/// Build the reader from the schema file, applying flag overrides
pub fn build_reader(args: &ReadArgs) -> CliResult<ConfigReader> {
    let mut file = SchemaFile::load(&args.schema)?;

    if args.case_sensitive {
        file.policy = file.policy.with_key_case(KeyCase::Sensitive);
    }
    if args.no_delay_exit {
        file.policy = file.policy.without_delay();
    }

    Ok(ConfigReader::from_schema_file(file)?)
}

/// Read and validate the config file named in `args`
pub fn load(args: &ReadArgs) -> CliResult<ParsedConfig> {
    let reader = build_reader(args)?;
    Ok(reader.read_file(&args.config)?)
}

/// Convert one value to JSON
pub fn lookup(parsed: &ParsedConfig, key: &str, as_type: ValueType) -> CliResult<Value> {
    let value = match as_type {
        ValueType::String => json!(parsed.get_value(key)?),
        ValueType::Int => json!(parsed.get_value_as_int(key)?),
        ValueType::Float => json!(parsed.get_value_as_float(key)?),
        ValueType::Bool => json!(parsed.get_value_as_simple_bool(key)?),
    };
    Ok(value)
}
