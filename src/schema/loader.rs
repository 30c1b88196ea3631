//! Schema definition files
//!
//! A schema file is JSON:
//!
//! ```json
//! {
//!   "policy": { "key_case": "insensitive", "invalid_entry": "fail_deferred" },
//!   "keys": [ { "key": "HOST", "pattern": "[a-z.]+", "required": true } ],
//!   "defaults": { "PORT": "80" }
//! }
//! ```
//!
//! Every policy field is optional and falls back to the classic defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::observability::{log_event_with_fields, Event, Severity as LogSeverity};
use crate::reader::ExitPolicy;

use super::errors::{SchemaError, SchemaResult};
use super::types::Validator;

fn default_required() -> bool {
    true
}

/// One key declaration in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyDef {
    pub key: String,
    pub pattern: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

/// Parsed schema definition file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub policy: ExitPolicy,
    #[serde(default)]
    pub keys: Vec<KeyDef>,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl SchemaFile {
    /// Loads and checks a schema file.
    ///
    /// Unreadable files, invalid JSON and uncompilable patterns are all
    /// `KVCONF_MALFORMED_SCHEMA`.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let file = Self::parse(&content)
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        let count = file.keys.len().to_string();
        log_event_with_fields(
            Event::SchemaLoaded,
            LogSeverity::Info,
            &[("keys", &count), ("path", &path.display().to_string())],
        );

        Ok(file)
    }

    /// Parses schema JSON and checks every pattern compiles.
    pub fn parse(content: &str) -> Result<Self, String> {
        let file: SchemaFile =
            serde_json::from_str(content).map_err(|e| format!("Invalid JSON: {}", e))?;

        for def in &file.keys {
            Validator::new(&def.pattern).map_err(|e| e.message().to_string())?;
        }

        Ok(file)
    }
}
