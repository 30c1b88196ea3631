//! Observability for kvconf
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//!
//! # Usage
//!
//! ```ignore
//! use kvconf::observability::{log_event_with_fields, Event, Severity};
//!
//! log_event_with_fields(Event::UnknownKey, Severity::Warn, &[("key", "EXTRA")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event with an explicit severity and fields
pub fn log_event_with_fields(event: Event, severity: Severity, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}
