//! Validation error types
//!
//! Error codes:
//! - ROSTER_MISSING_FIELDS (REJECT)
//! - ROSTER_INVALID_TYPE (REJECT)
//! - ROSTER_EMPTY_FIELDS (REJECT)

use std::fmt;

/// Severity levels for validation errors
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

/// Validation error codes, one per stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Required fields absent from the payload
    MissingFields,
    /// Fields holding a value of the wrong type or format
    InvalidType,
    /// Fields holding null or zero-length values
    EmptyFields,
}

impl ValidationErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::MissingFields => "ROSTER_MISSING_FIELDS",
            ValidationErrorCode::InvalidType => "ROSTER_INVALID_TYPE",
            ValidationErrorCode::EmptyFields => "ROSTER_EMPTY_FIELDS",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }

    /// Message prefix placed before the offending field list
    fn preamble(&self) -> &'static str {
        match self {
            ValidationErrorCode::MissingFields => "Input object is missing the following fields: ",
            ValidationErrorCode::InvalidType => {
                "Input object has incorrect types for the following fields: "
            }
            ValidationErrorCode::EmptyFields => {
                "Empty fields found in input object on the following fields: "
            }
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which type/format check a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    /// Canonical 8-4-4-4-12 hex UUID text
    Uuid,
    /// Any string value
    String,
}

impl FieldCheck {
    pub fn tag(&self) -> &'static str {
        match self {
            FieldCheck::Uuid => "UUID",
            FieldCheck::String => "string",
        }
    }
}

/// A single offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as it appears on the payload
    pub field: String,
    /// Failed check, for type/format violations
    pub check: Option<FieldCheck>,
}

impl FieldViolation {
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            check: None,
        }
    }

    pub fn failed_check(field: impl Into<String>, check: FieldCheck) -> Self {
        Self {
            field: field.into(),
            check: Some(check),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.check {
            Some(check) => write!(f, "{} [{}]", self.field, check.tag()),
            None => write!(f, "{}", self.field),
        }
    }
}

/// Validation failure carrying every violation found by one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn missing_fields(violations: Vec<FieldViolation>) -> Self {
        Self {
            code: ValidationErrorCode::MissingFields,
            violations,
        }
    }

    pub fn invalid_type(violations: Vec<FieldViolation>) -> Self {
        Self {
            code: ValidationErrorCode::InvalidType,
            violations,
        }
    }

    pub fn empty_fields(violations: Vec<FieldViolation>) -> Self {
        Self {
            code: ValidationErrorCode::EmptyFields,
            violations,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the violations in reporting order
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns the violations joined with `,`
    pub fn field_list(&self) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Returns the human-readable message
    pub fn message(&self) -> String {
        format!("{}{}", self.code.preamble(), self.field_list())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation stages
pub type ValidationResult<T> = Result<T, ValidationError>;
