//! Schema type definitions
//!
//! - `Validator`: a pattern that must match a value in full
//! - `SchemaEntry`: one declared key
//! - `KeyCase`: the key normalization shared by schema and parsed config

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Key normalization rule for one reader instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    /// Keys are compared as written
    Sensitive,
    /// Keys are uppercased before storage and lookup
    #[default]
    Insensitive,
}

impl KeyCase {
    /// Builds the rule from the legacy case-insensitivity flag
    pub fn from_insensitive(insensitive: bool) -> Self {
        if insensitive {
            KeyCase::Insensitive
        } else {
            KeyCase::Sensitive
        }
    }

    /// Returns the stored form of `key`
    pub fn normalize(&self, key: &str) -> String {
        match self {
            KeyCase::Sensitive => key.to_string(),
            KeyCase::Insensitive => key.to_ascii_uppercase(),
        }
    }
}

/// A value validator with full-string match semantics.
///
/// The pattern is compiled anchored on both ends, so `[0-9]+` rejects `8080x`
/// even though it contains a match.
#[derive(Debug, Clone)]
pub struct Validator {
    pattern: String,
    anchored: Regex,
}

impl Validator {
    /// Compiles a validator from a pattern string
    pub fn new(pattern: &str) -> SchemaResult<Self> {
        // Compile bare first so "a)(b" cannot pass by closing the wrapping group
        Regex::new(pattern).map_err(|e| SchemaError::invalid_pattern(pattern, e))?;
        // A trailing (?x) comment swallows the closing group; a newline ends it
        let anchored = Regex::new(&format!("^(?:{})$", pattern))
            .or_else(|_| Regex::new(&format!("^(?:{}\n)$", pattern)))
            .map_err(|e| SchemaError::invalid_pattern(pattern, e))?;

        Ok(Self {
            pattern: pattern.to_string(),
            anchored,
        })
    }

    /// Builds a validator from an already compiled regex
    pub fn from_regex(regex: &Regex) -> SchemaResult<Self> {
        Self::new(regex.as_str())
    }

    /// Returns the pattern as declared
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if `value` matches the pattern in full
    pub fn is_match(&self, value: &str) -> bool {
        self.anchored.is_match(value)
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// One declared key in the schema
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    /// Normalized key name
    pub key: String,
    /// Value validator
    pub validator: Validator,
    /// Whether the key must be assigned by the config file
    pub required: bool,
}

impl SchemaEntry {
    pub fn new(key: impl Into<String>, validator: Validator, required: bool) -> Self {
        Self {
            key: key.into(),
            validator,
            required,
        }
    }
}
