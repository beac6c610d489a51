//! Observability subsystem for roster
//!
//! Provides:
//! - Structured logging (JSON, one line per event)
//! - Counters for read/write handler activity
//! - Begin/complete scopes around handler invocations
//!
//! Observability is read-only: nothing here changes handler outcomes.
//!
//! # Usage
//!
//! ```ignore
//! use roster::observability::{Event, Logger, MetricsRegistry, ObservationScope};
//!
//! Logger::info(Event::QueryPlanned.as_str(), &[("plan", "POINT_LOOKUP")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_reads_served();
//!
//! let scope = ObservationScope::new("READ");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
