//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Requested resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Throughput exceeded: {0}")]
    Throttled(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Data file error: {0}")]
    DataFile(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Whether the client may transparently retry the call
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::Timeout(_) | StoreError::Throttled(_) | StoreError::Unavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(StoreError::Timeout(5000).is_retryable());
        assert!(StoreError::Throttled("t".into()).is_retryable());
        assert!(StoreError::Unavailable("down".into()).is_retryable());
        assert!(!StoreError::ResourceNotFound("Table".into()).is_retryable());
        assert!(!StoreError::Validation("bad".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            StoreError::Timeout(5000).to_string(),
            "Request timed out after 5000ms"
        );
    }
}
