//! The result of a successful read

use std::collections::BTreeMap;

use crate::accessor::Defaults;
use crate::schema::KeyCase;

use super::fault::{Diagnostic, DiagnosticKind};

/// Validated values of one read, keyed by normalized key.
///
/// Every key here is declared in the schema the read ran against.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    values: BTreeMap<String, String>,
    defaults: Defaults,
    diagnostics: Vec<Diagnostic>,
    key_case: KeyCase,
}

impl ParsedConfig {
    pub(crate) fn new(
        values: BTreeMap<String, String>,
        defaults: Defaults,
        diagnostics: Vec<Diagnostic>,
        key_case: KeyCase,
    ) -> Self {
        Self {
            values,
            defaults,
            diagnostics,
            key_case,
        }
    }

    /// Gets the parsed value of `key`, normalizing it first. Defaults are
    /// not consulted.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&self.key_case.normalize(key))
            .map(String::as_str)
    }

    /// Returns all parsed values in key order.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Consumes the result, returning the value map.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }

    /// Returns the fallback values known at read time.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Returns the warnings emitted during the read.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the diagnostics of one kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
