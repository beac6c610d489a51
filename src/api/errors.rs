//! Handler error types
//!
//! Planner and validation errors pass through with their own codes.
//! Store failures are wrapped with the path they occurred on.
//!
//! Error codes:
//! - ROSTER_QUERY_UNSUPPORTED (REJECT, from planner)
//! - ROSTER_MISSING_FIELDS / ROSTER_INVALID_TYPE / ROSTER_EMPTY_FIELDS (REJECT, from validator)
//! - ROSTER_INVALID_REQUEST (REJECT)
//! - ROSTER_STORE_QUERY_FAILED (ERROR)
//! - ROSTER_STORE_WRITE_FAILED (ERROR)

use std::fmt;

use thiserror::Error;

use crate::planner::PlannerError;
use crate::store::StoreError;
use crate::validator::ValidationError;

/// Handler error severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller input rejected, nothing was read or written
    Reject,
    /// The store failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Error returned by the read and write handlers
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Query(#[from] PlannerError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("[REJECT] ROSTER_INVALID_REQUEST: {0}")]
    InvalidRequest(String),

    #[error("[ERROR] ROSTER_STORE_QUERY_FAILED: {0}")]
    StoreQuery(#[source] StoreError),

    #[error("[ERROR] ROSTER_STORE_WRITE_FAILED: {0}")]
    StoreWrite(#[source] StoreError),
}

impl HandlerError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        HandlerError::InvalidRequest(reason.into())
    }

    /// Stable string code
    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::Query(e) => e.code().code(),
            HandlerError::Validation(e) => e.code().code(),
            HandlerError::InvalidRequest(_) => "ROSTER_INVALID_REQUEST",
            HandlerError::StoreQuery(_) => "ROSTER_STORE_QUERY_FAILED",
            HandlerError::StoreWrite(_) => "ROSTER_STORE_WRITE_FAILED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            HandlerError::Query(_) | HandlerError::Validation(_) | HandlerError::InvalidRequest(_) => {
                Severity::Reject
            }
            HandlerError::StoreQuery(_) | HandlerError::StoreWrite(_) => Severity::Error,
        }
    }

    /// Human-readable message without code or severity
    pub fn message(&self) -> String {
        match self {
            HandlerError::Query(e) => e.message().to_string(),
            HandlerError::Validation(e) => e.message(),
            HandlerError::InvalidRequest(reason) => reason.clone(),
            HandlerError::StoreQuery(e) | HandlerError::StoreWrite(e) => e.to_string(),
        }
    }

    /// True when the caller's input was at fault
    pub fn is_rejection(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

/// Result type for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;
