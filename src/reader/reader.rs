//! Config reader: schema, policy and the read state machine
//!
//! Idle -> Reading -> [Aborted] -> Completing -> [Rejected] -> Done
//!
//! `Aborted` and `Rejected` are returned as `ReadError`; the library never
//! terminates the process itself.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::accessor::Defaults;
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::schema::{SchemaFile, SchemaResult, SchemaStore, SchemaValidator, Validator, Verdict};

use super::errors::{FailureReport, ReadError, ReadResult};
use super::fault::{Diagnostic, FaultRecord};
use super::line::{classify, LineClass};
use super::parsed::ParsedConfig;
use super::policy::{ExitPolicy, FaultController, PolicyFlags};
use super::source::{self, Source};

/// Schema-driven reader for `KEY=VALUE` config files.
///
/// The policy is fixed at construction. The schema may change between
/// reads; each read sees the schema as it was when the read started.
#[derive(Debug, Clone)]
pub struct ConfigReader {
    policy: ExitPolicy,
    schema: SchemaStore,
    defaults: Defaults,
}

impl Default for ConfigReader {
    fn default() -> Self {
        Self::new(ExitPolicy::default())
    }
}

impl ConfigReader {
    /// Creates a reader with an empty schema.
    pub fn new(policy: ExitPolicy) -> Self {
        Self {
            policy,
            schema: SchemaStore::new(policy.key_case),
            defaults: Defaults::new(policy.key_case),
        }
    }

    /// Creates a reader from the classic boolean toggles.
    pub fn with_flags(flags: PolicyFlags) -> Self {
        Self::new(ExitPolicy::from_flags(flags))
    }

    /// Builds a reader from a schema definition file.
    ///
    /// Schema errors here are fatal regardless of policy: a half-declared
    /// schema is not usable.
    pub fn from_schema_file(file: SchemaFile) -> SchemaResult<Self> {
        let mut reader = Self::new(file.policy);

        for def in &file.keys {
            let validator = Validator::new(&def.pattern)?;
            reader
                .schema
                .add(&def.key, validator, def.required)
                .map_err(|e| e.into_fatal())?;
        }
        for (key, value) in &file.defaults {
            reader.set_default(key, value);
        }

        Ok(reader)
    }

    pub fn policy(&self) -> &ExitPolicy {
        &self.policy
    }

    pub fn schema(&self) -> &SchemaStore {
        &self.schema
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Declares a key.
    ///
    /// # Errors
    ///
    /// `KVCONF_DUPLICATE_KEY` if already declared. The error is fatal when the
    /// invalid-key policy fails; the existing declaration is kept either way.
    pub fn add_key(&mut self, key: &str, validator: Validator, required: bool) -> SchemaResult<()> {
        let escalate = self.policy.invalid_key.is_failing();
        self.schema.add(key, validator, required).map_err(|e| {
            if escalate {
                e.into_fatal()
            } else {
                e
            }
        })
    }

    /// Declares a key from a pattern string.
    pub fn add_key_pattern(&mut self, key: &str, pattern: &str, required: bool) -> SchemaResult<()> {
        self.add_key(key, Validator::new(pattern)?, required)
    }

    /// Removes a declared key.
    ///
    /// # Errors
    ///
    /// `KVCONF_UNKNOWN_KEY` if the key is not declared. Never fatal.
    pub fn remove_key(&mut self, key: &str) -> SchemaResult<()> {
        self.schema.remove(key).map(|_| ())
    }

    /// Replaces the declaration of an existing key.
    pub fn update_key(&mut self, key: &str, validator: Validator, required: bool) -> SchemaResult<()> {
        self.schema.update(key, validator, required)
    }

    /// Replaces the declaration of an existing key from a pattern string.
    pub fn update_key_pattern(
        &mut self,
        key: &str,
        pattern: &str,
        required: bool,
    ) -> SchemaResult<()> {
        let validator = Validator::new(pattern)?;
        self.update_key(key, validator, required)
    }

    /// Sets the fallback value typed accessors use when `key` is not parsed.
    pub fn set_default(&mut self, key: &str, value: &str) -> Option<String> {
        self.defaults.set(key, value)
    }

    /// Removes the fallback value of `key`.
    pub fn remove_default(&mut self, key: &str) -> Option<String> {
        self.defaults.remove(key)
    }

    /// Reads and validates the config file at `path`.
    pub fn read_file(&self, path: &Path) -> ReadResult<ParsedConfig> {
        let origin = path.display().to_string();
        self.read_source(&origin, source::open(path))
    }

    /// Reads and validates config text.
    pub fn read_str(&self, content: &str) -> ReadResult<ParsedConfig> {
        self.read_source("<memory>", Source::Content(content.to_string()))
    }

    /// Reads and validates config text from a stream.
    pub fn read_from<R: Read>(&self, reader: R) -> ReadResult<ParsedConfig> {
        self.read_source("<stream>", source::read_stream(reader))
    }

    fn read_source(&self, origin: &str, source: Source) -> ReadResult<ParsedConfig> {
        log_event_with_fields(Event::ReadStart, Severity::Info, &[("source", origin)]);

        let result = self.run(origin, source);

        match &result {
            Ok(parsed) => {
                let count = parsed.len().to_string();
                log_event_with_fields(
                    Event::ReadComplete,
                    Severity::Info,
                    &[("source", origin), ("values", &count)],
                );
            }
            Err(e) => {
                log_event_with_fields(
                    Event::ReadFailed,
                    Severity::Fatal,
                    &[("code", e.code()), ("source", origin)],
                );
            }
        }

        result
    }

    fn run(&self, origin: &str, source: Source) -> ReadResult<ParsedConfig> {
        let mut controller = FaultController::new(self.policy);
        let mut values = BTreeMap::new();

        if self.schema.is_empty() {
            controller.emit(Diagnostic::empty_schema());
        }

        match source {
            Source::Content(content) => self.scan(&content, &mut values, &mut controller)?,
            Source::NotFound { reason } => {
                // Not found under a warning policy is an empty file
                controller.handle(FaultRecord::file_not_found(origin, &reason), Severity::Error)?
            }
        }

        self.complete(values, controller)
    }

    /// Processes every line, stopping at the first immediate failure.
    fn scan(
        &self,
        content: &str,
        values: &mut BTreeMap<String, String>,
        controller: &mut FaultController,
    ) -> Result<(), ReadError> {
        let validator = SchemaValidator::new(&self.schema);

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;

            let (key, value) = match classify(raw) {
                LineClass::Blank => continue,
                LineClass::Malformed { text, reason } => {
                    let fault = FaultRecord::malformed_line(&text, reason.as_str(), line);
                    controller.handle(fault, Severity::Warn)?;
                    continue;
                }
                LineClass::Assignment { key, value } => (key, value),
            };

            match validator.validate_entry(&key, &value) {
                Verdict::Accepted { key } => {
                    if let Some(previous) = values.insert(key.clone(), value.clone()) {
                        controller.emit(Diagnostic::duplicate_entry(&key, &previous, &value, line));
                    }
                }
                Verdict::UnknownKey { key } => {
                    controller.handle(FaultRecord::unknown_key(&key, line), Severity::Warn)?;
                }
                Verdict::Rejected { key, required } => {
                    // Required only changes the label, not the outcome
                    let severity = if required {
                        Severity::Error
                    } else {
                        Severity::Warn
                    };
                    controller.handle(FaultRecord::failed_validation(&key, &value, line), severity)?;
                }
            }
        }

        Ok(())
    }

    /// Checks required keys and resolves any pending exit.
    fn complete(
        &self,
        values: BTreeMap<String, String>,
        mut controller: FaultController,
    ) -> ReadResult<ParsedConfig> {
        for entry in self.schema.required_entries() {
            if !values.contains_key(&entry.key) {
                controller.handle(FaultRecord::missing_required_key(&entry.key), Severity::Warn)?;
            }
        }

        let exit_pending = controller.exit_pending();
        let (missing_keys, faults, diagnostics) = controller.into_parts();

        if exit_pending {
            return Err(ReadError::Rejected(FailureReport {
                missing_keys,
                faults,
                diagnostics,
            }));
        }

        Ok(ParsedConfig::new(
            values,
            self.defaults.clone(),
            diagnostics,
            self.policy.key_case,
        ))
    }
}
