//! JSON output for CLI
//!
//! Results go to stdout as a single JSON document; diagnostics never do.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write parsed values to stdout
pub fn write_values(values: &BTreeMap<String, String>) -> CliResult<()> {
    write_json(&serde_json::to_value(values)?)
}

/// Write a single JSON value to stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
