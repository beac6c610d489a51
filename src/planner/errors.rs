//! Planner error types
//!
//! Error codes:
//! - ROSTER_QUERY_UNSUPPORTED (REJECT)

use std::fmt;

/// Text returned when a query object matches no supported shape
pub const UNSUPPORTED_QUERY_MESSAGE: &str = "Query not supported! Your query object should supply: (schoolId, studentId) OR (studentLastName) OR (schoolId)";

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Query object matches none of the supported shapes
    UnsupportedQuery,
}

impl PlannerErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::UnsupportedQuery => "ROSTER_QUERY_UNSUPPORTED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
}

impl PlannerError {
    /// Create an unsupported query error
    pub fn unsupported_query() -> Self {
        Self {
            code: PlannerErrorCode::UnsupportedQuery,
            message: UNSUPPORTED_QUERY_MESSAGE.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            PlannerErrorCode::UnsupportedQuery.code(),
            "ROSTER_QUERY_UNSUPPORTED"
        );
    }

    #[test]
    fn test_unsupported_message_is_verbatim() {
        let err = PlannerError::unsupported_query();
        assert_eq!(
            err.message(),
            "Query not supported! Your query object should supply: (schoolId, studentId) OR (studentLastName) OR (schoolId)"
        );
    }

    #[test]
    fn test_error_display() {
        let display = PlannerError::unsupported_query().to_string();
        assert!(display.starts_with("[REJECT] ROSTER_QUERY_UNSUPPORTED: Query not supported!"));
    }
}
