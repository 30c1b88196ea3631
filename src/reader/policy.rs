//! Exit policy and the fault controller
//!
//! Every fault kind maps to one `FaultPolicy`. The controller applies it:
//! warn and continue, record and continue (exit pending), or stop the read.

use serde::Deserialize;

use crate::observability::{log_event_with_fields, Severity};
use crate::schema::KeyCase;

use super::fault::{Diagnostic, FaultKind, FaultRecord};
use super::ReadError;

/// Outcome configured for one fault kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Emit a warning and continue
    Warn,
    /// Stop the read at the fault
    FailImmediate,
    /// Record the fault, finish the scan, then fail
    FailDeferred,
}

impl FaultPolicy {
    /// Maps a legacy fail toggle plus the global delay toggle
    pub fn from_flags(fail: bool, delay_exit: bool) -> Self {
        match (fail, delay_exit) {
            (false, _) => FaultPolicy::Warn,
            (true, false) => FaultPolicy::FailImmediate,
            (true, true) => FaultPolicy::FailDeferred,
        }
    }

    /// Returns true unless the policy only warns
    pub fn is_failing(&self) -> bool {
        !matches!(self, FaultPolicy::Warn)
    }
}

/// The seven booleans of the classic reader constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyFlags {
    pub keys_case_insensitive: bool,
    pub exit_on_invalid_key: bool,
    pub exit_on_invalid_entry: bool,
    pub exit_file_not_found: bool,
    pub exit_on_missing_entry: bool,
    pub exit_on_invalid_line: bool,
    pub delay_exit: bool,
}

impl Default for PolicyFlags {
    fn default() -> Self {
        Self {
            keys_case_insensitive: true,
            exit_on_invalid_key: false,
            exit_on_invalid_entry: true,
            exit_file_not_found: false,
            exit_on_missing_entry: true,
            exit_on_invalid_line: true,
            delay_exit: true,
        }
    }
}

fn default_invalid_key() -> FaultPolicy {
    FaultPolicy::Warn
}

fn default_failing() -> FaultPolicy {
    FaultPolicy::FailDeferred
}

/// Reader-wide exit policy, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExitPolicy {
    #[serde(default)]
    pub key_case: KeyCase,
    #[serde(default = "default_invalid_key")]
    pub invalid_key: FaultPolicy,
    #[serde(default = "default_failing")]
    pub invalid_entry: FaultPolicy,
    #[serde(default = "default_invalid_key")]
    pub file_not_found: FaultPolicy,
    #[serde(default = "default_failing")]
    pub missing_entry: FaultPolicy,
    #[serde(default = "default_failing")]
    pub invalid_line: FaultPolicy,
}

impl Default for ExitPolicy {
    fn default() -> Self {
        Self::from_flags(PolicyFlags::default())
    }
}

impl ExitPolicy {
    /// Builds a policy from the classic boolean toggles.
    ///
    /// A failing file-not-found toggle always fails immediately: there is no
    /// scan to delay for.
    pub fn from_flags(flags: PolicyFlags) -> Self {
        let delay = flags.delay_exit;
        Self {
            key_case: KeyCase::from_insensitive(flags.keys_case_insensitive),
            invalid_key: FaultPolicy::from_flags(flags.exit_on_invalid_key, delay),
            invalid_entry: FaultPolicy::from_flags(flags.exit_on_invalid_entry, delay),
            file_not_found: FaultPolicy::from_flags(flags.exit_file_not_found, false),
            missing_entry: FaultPolicy::from_flags(flags.exit_on_missing_entry, delay),
            invalid_line: FaultPolicy::from_flags(flags.exit_on_invalid_line, delay),
        }
    }

    /// A policy that only ever warns
    pub fn lenient(key_case: KeyCase) -> Self {
        Self {
            key_case,
            invalid_key: FaultPolicy::Warn,
            invalid_entry: FaultPolicy::Warn,
            file_not_found: FaultPolicy::Warn,
            missing_entry: FaultPolicy::Warn,
            invalid_line: FaultPolicy::Warn,
        }
    }

    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    pub fn with_invalid_key(mut self, policy: FaultPolicy) -> Self {
        self.invalid_key = policy;
        self
    }

    pub fn with_invalid_entry(mut self, policy: FaultPolicy) -> Self {
        self.invalid_entry = policy;
        self
    }

    pub fn with_file_not_found(mut self, policy: FaultPolicy) -> Self {
        self.file_not_found = policy;
        self
    }

    pub fn with_missing_entry(mut self, policy: FaultPolicy) -> Self {
        self.missing_entry = policy;
        self
    }

    pub fn with_invalid_line(mut self, policy: FaultPolicy) -> Self {
        self.invalid_line = policy;
        self
    }

    /// Turns every deferred policy into an immediate one
    pub fn without_delay(mut self) -> Self {
        for policy in [
            &mut self.invalid_key,
            &mut self.invalid_entry,
            &mut self.file_not_found,
            &mut self.missing_entry,
            &mut self.invalid_line,
        ] {
            if *policy == FaultPolicy::FailDeferred {
                *policy = FaultPolicy::FailImmediate;
            }
        }
        self
    }

    /// Returns the policy governing `kind`
    pub fn policy_for(&self, kind: FaultKind) -> FaultPolicy {
        match kind {
            FaultKind::UnknownKey => self.invalid_key,
            FaultKind::FailedValidation => self.invalid_entry,
            FaultKind::MalformedLine => self.invalid_line,
            FaultKind::MissingRequiredKey => self.missing_entry,
            FaultKind::FileNotFound => self.file_not_found,
        }
    }
}

/// Per-read state of the fault controller.
///
/// `exit_pending` is shared by all fault kinds: one deferred fault of any
/// kind fails the whole read at completion.
#[derive(Debug)]
pub(crate) struct FaultController {
    policy: ExitPolicy,
    deferred: Vec<FaultRecord>,
    missing: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    exit_pending: bool,
}

impl FaultController {
    pub(crate) fn new(policy: ExitPolicy) -> Self {
        Self {
            policy,
            deferred: Vec::new(),
            missing: Vec::new(),
            diagnostics: Vec::new(),
            exit_pending: false,
        }
    }

    /// Applies the policy for `fault`.
    ///
    /// `warn_severity` is the label used when the policy only warns.
    pub(crate) fn handle(
        &mut self,
        fault: FaultRecord,
        warn_severity: Severity,
    ) -> Result<(), ReadError> {
        match self.policy.policy_for(fault.kind) {
            FaultPolicy::FailImmediate => {
                self.emit(Diagnostic::from_fault(&fault, Severity::Error));
                Err(ReadError::Aborted(fault))
            }
            FaultPolicy::FailDeferred => {
                if fault.kind == FaultKind::MissingRequiredKey {
                    if let Some(key) = &fault.key {
                        self.missing.push(key.clone());
                    }
                } else {
                    self.deferred.push(fault);
                }
                self.exit_pending = true;
                Ok(())
            }
            FaultPolicy::Warn => {
                self.emit(Diagnostic::from_fault(&fault, warn_severity));
                Ok(())
            }
        }
    }

    /// Logs a diagnostic and keeps it for the read result
    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        let line = diagnostic.line.map(|l| l.to_string()).unwrap_or_default();
        let mut fields = vec![("message", diagnostic.message.as_str())];
        if !line.is_empty() {
            fields.push(("line", line.as_str()));
        }
        log_event_with_fields(diagnostic.event(), diagnostic.severity, &fields);
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn exit_pending(&self) -> bool {
        self.exit_pending
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<FaultRecord>, Vec<Diagnostic>) {
        (self.missing, self.deferred, self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_mapping() {
        assert_eq!(FaultPolicy::from_flags(false, true), FaultPolicy::Warn);
        assert_eq!(FaultPolicy::from_flags(false, false), FaultPolicy::Warn);
        assert_eq!(FaultPolicy::from_flags(true, false), FaultPolicy::FailImmediate);
        assert_eq!(FaultPolicy::from_flags(true, true), FaultPolicy::FailDeferred);
    }

    #[test]
    fn test_default_policy_matches_classic_defaults() {
        let policy = ExitPolicy::default();
        assert_eq!(policy.key_case, KeyCase::Insensitive);
        assert_eq!(policy.invalid_key, FaultPolicy::Warn);
        assert_eq!(policy.invalid_entry, FaultPolicy::FailDeferred);
        assert_eq!(policy.file_not_found, FaultPolicy::Warn);
        assert_eq!(policy.missing_entry, FaultPolicy::FailDeferred);
        assert_eq!(policy.invalid_line, FaultPolicy::FailDeferred);
    }

    #[test]
    fn test_file_not_found_never_deferred() {
        let policy = ExitPolicy::from_flags(PolicyFlags {
            exit_file_not_found: true,
            ..PolicyFlags::default()
        });
        assert_eq!(policy.file_not_found, FaultPolicy::FailImmediate);
    }

    #[test]
    fn test_without_delay() {
        let policy = ExitPolicy::default().without_delay();
        assert_eq!(policy.invalid_entry, FaultPolicy::FailImmediate);
        assert_eq!(policy.missing_entry, FaultPolicy::FailImmediate);
        assert_eq!(policy.invalid_key, FaultPolicy::Warn);
        assert_eq!(policy.file_not_found, FaultPolicy::Warn);
    }

    #[test]
    fn test_without_delay_covers_file_not_found() {
        let policy = ExitPolicy::default()
            .with_file_not_found(FaultPolicy::FailDeferred)
            .without_delay();
        assert_eq!(policy.file_not_found, FaultPolicy::FailImmediate);
    }

    #[test]
    fn test_policy_rejects_unknown_fields() {
        let result = serde_json::from_str::<ExitPolicy>(r#"{"invalid_keys":"warn"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: ExitPolicy =
            serde_json::from_str(r#"{"key_case":"sensitive","invalid_key":"fail_immediate"}"#)
                .unwrap();
        assert_eq!(policy.key_case, KeyCase::Sensitive);
        assert_eq!(policy.invalid_key, FaultPolicy::FailImmediate);
        assert_eq!(policy.invalid_entry, FaultPolicy::FailDeferred);
        assert_eq!(policy.file_not_found, FaultPolicy::Warn);
    }

    #[test]
    fn test_controller_immediate_aborts() {
        let policy = ExitPolicy::lenient(KeyCase::Insensitive)
            .with_invalid_key(FaultPolicy::FailImmediate);
        let mut controller = FaultController::new(policy);

        let err = controller
            .handle(FaultRecord::unknown_key("EXTRA", 1), Severity::Warn)
            .unwrap_err();
        assert!(matches!(err, ReadError::Aborted(ref f) if f.line == Some(1)));
        assert!(!controller.exit_pending());
    }

    #[test]
    fn test_controller_deferred_marks_exit_pending() {
        let mut controller = FaultController::new(ExitPolicy::default());

        let fault = FaultRecord::malformed_line("junk", "did not match any expressions", 2);
        controller.handle(fault, Severity::Warn).unwrap();
        controller
            .handle(FaultRecord::missing_required_key("HOST"), Severity::Warn)
            .unwrap();

        assert!(controller.exit_pending());
        let (missing, deferred, diagnostics) = controller.into_parts();
        assert_eq!(missing, vec!["HOST".to_string()]);
        assert_eq!(deferred.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_controller_warn_uses_given_severity() {
        let mut controller = FaultController::new(ExitPolicy::lenient(KeyCase::Insensitive));

        controller
            .handle(FaultRecord::failed_validation("HOST", "X", 1), Severity::Error)
            .unwrap();

        assert!(!controller.exit_pending());
        let (_, _, diagnostics) = controller.into_parts();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }
}
