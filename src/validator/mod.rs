//! Field validation for student writes
//!
//! A write payload passes through three stages, in order:
//!
//! 1. Presence: every required field exists on the payload
//! 2. Type/format: UUID fields hold canonical UUID text, everything else is a string
//! 3. Non-emptiness: no field is null or zero-length
//!
//! Each stage reports every violating field it finds. The pipeline stops at
//! the first stage that fails.

mod errors;
mod validator;

pub use errors::{FieldCheck, FieldViolation, Severity, ValidationError, ValidationErrorCode, ValidationResult};
pub use validator::{is_canonical_uuid, FieldValidator};
