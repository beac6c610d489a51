//! Observable events for roster
//!
//! Events are explicit and typed; each maps to a stable upper-case name.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Store handle ready, handlers constructed
    BootComplete,
    /// Configuration loaded
    ConfigLoaded,
    /// Records loaded from the data file
    DataLoaded,
    /// Records written back to the data file
    DataSaved,
    /// Writing the data file failed
    DataSaveFailed,
    /// Line-delimited serving loop started
    Serving,
    /// Serving loop finished, stdin closed
    Shutdown,

    // Read path
    /// Query plan derived from input
    QueryPlanned,
    /// Query input matched no supported shape
    QueryRejected,
    /// One page returned by the store
    PageFetched,
    /// A page or point lookup failed
    QueryFailed,

    // Write path
    /// Write payload failed validation
    WriteRejected,
    /// Record persisted
    WriteCommit,
    /// Persisting the record failed
    WriteFailed,

    // Store client
    /// Transient store failure, retrying
    StoreRetry,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "ROSTER_STARTUP_BEGIN",
            Event::BootComplete => "ROSTER_STARTUP_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DataLoaded => "DATA_LOADED",
            Event::DataSaved => "DATA_SAVED",
            Event::DataSaveFailed => "DATA_SAVE_FAILED",
            Event::Serving => "ROSTER_SERVING",
            Event::Shutdown => "ROSTER_SHUTDOWN",

            Event::QueryPlanned => "QUERY_PLANNED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::PageFetched => "PAGE_FETCHED",
            Event::QueryFailed => "QUERY_FAILED",

            Event::WriteRejected => "WRITE_REJECTED",
            Event::WriteCommit => "WRITE_COMMIT",
            Event::WriteFailed => "WRITE_FAILED",

            Event::StoreRetry => "STORE_RETRY",
        }
    }

    /// Returns true if this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::QueryFailed | Event::WriteFailed | Event::DataSaveFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
