//! Three-stage field validator for write payloads
//!
//! Stages operate on the raw JSON object so that values of the wrong type
//! can be reported rather than rejected by the decoder. Iteration follows
//! the payload's insertion order.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::record::fields;

use super::errors::{FieldCheck, FieldViolation, ValidationError, ValidationResult};

fn uuid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("UUID pattern is valid")
    })
}

/// Returns true if `text` is a UUID in canonical 8-4-4-4-12 hex form
pub fn is_canonical_uuid(text: &str) -> bool {
    uuid_pattern().is_match(text)
}

/// Validator bound to a set of required fields and UUID fields.
///
/// The individual stages are associated functions so callers can run any
/// one of them on its own; `validate` chains all three.
#[derive(Debug, Clone)]
pub struct FieldValidator<'a> {
    required_fields: &'a [&'a str],
    uuid_fields: &'a [&'a str],
}

impl<'a> FieldValidator<'a> {
    /// Creates a validator over the given field lists
    pub fn new(required_fields: &'a [&'a str], uuid_fields: &'a [&'a str]) -> Self {
        Self {
            required_fields,
            uuid_fields,
        }
    }

    /// Runs presence, type/format and non-emptiness checks in order,
    /// stopping at the first stage that fails.
    pub fn validate(&self, payload: &Map<String, Value>) -> ValidationResult<()> {
        Self::verify_presence(payload, self.required_fields)?;
        Self::verify_types(payload, self.uuid_fields)?;
        Self::verify_non_empty(payload)?;
        Ok(())
    }

    /// Fails with every required field absent from the payload, in
    /// `required_fields` order. A field set to null is present.
    pub fn verify_presence(
        payload: &Map<String, Value>,
        required_fields: &[&str],
    ) -> ValidationResult<()> {
        let missing: Vec<FieldViolation> = required_fields
            .iter()
            .filter(|field| !payload.contains_key(**field))
            .map(|field| FieldViolation::field(*field))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::missing_fields(missing))
        }
    }

    /// Checks every field on the payload: UUID fields must hold canonical
    /// UUID text, all other fields must be strings (empty is fine here).
    pub fn verify_types(payload: &Map<String, Value>, uuid_fields: &[&str]) -> ValidationResult<()> {
        let mut invalid = Vec::new();

        for (field, value) in payload {
            if uuid_fields.contains(&field.as_str()) {
                let valid = value.as_str().is_some_and(is_canonical_uuid);
                if !valid {
                    invalid.push(FieldViolation::failed_check(field, FieldCheck::Uuid));
                }
            } else if !value.is_string() {
                invalid.push(FieldViolation::failed_check(field, FieldCheck::String));
            }
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::invalid_type(invalid))
        }
    }

    /// Fails with every field whose value is null or has no positive length.
    ///
    /// Values without a length (numbers, booleans, objects) count as empty.
    pub fn verify_non_empty(payload: &Map<String, Value>) -> ValidationResult<()> {
        let empty: Vec<FieldViolation> = payload
            .iter()
            .filter(|(_, value)| value_length(value) == 0)
            .map(|(field, _)| FieldViolation::field(field))
            .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::empty_fields(empty))
        }
    }
}

impl FieldValidator<'static> {
    /// Validator for the student write payload
    pub fn student() -> Self {
        Self::new(&fields::ALL, &fields::UUID)
    }
}

/// Length of a value for the emptiness check; zero when it has none.
fn value_length(value: &Value) -> usize {
    match value {
        Value::String(s) => s.len(),
        Value::Array(a) => a.len(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => 0,
    }
}
