//! Observability for the endpoint layer
//!
//! Typed lifecycle events emitted through `tracing`. Installing a
//! subscriber is the host process's job; without one these calls are no-ops.
//!
//! # Usage
//!
//! ```ignore
//! use opsrest::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ProtocolError, &[("status", "404")]);
//! ```

mod events;

pub use events::{Event, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Fields are rendered as `key=value` pairs in the order given.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let detail = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");
    let name = event.as_str();

    match event.severity() {
        Severity::Trace => tracing::trace!(event = name, "{}", detail),
        Severity::Debug => tracing::debug!(event = name, "{}", detail),
        Severity::Info => tracing::info!(event = name, "{}", detail),
        Severity::Warn => tracing::warn!(event = name, "{}", detail),
        Severity::Error => tracing::error!(event = name, "{}", detail),
    }
}
