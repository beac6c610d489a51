//! Response envelopes
//!
//! `{"status":"ok","data":...}` or `{"status":"error","code":...,"message":...}`

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::errors::HandlerError;

/// Success response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub status: String,
    pub data: Value,
}

impl SuccessResponse {
    pub fn new(data: Value) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }

    /// Success with `data: null`
    pub fn empty() -> Self {
        Self::new(Value::Null)
    }

    pub fn to_value(&self) -> Value {
        json!({ "status": self.status, "data": self.data })
    }
}

/// Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn from_error(err: &HandlerError) -> Self {
        Self::new(err.code(), err.message())
    }

    pub fn to_value(&self) -> Value {
        json!({ "status": self.status, "code": self.code, "message": self.message })
    }
}

/// Unified response type
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn success(data: Value) -> Self {
        Response::Success(SuccessResponse::new(data))
    }

    pub fn ok() -> Self {
        Response::Success(SuccessResponse::empty())
    }

    pub fn error(err: &HandlerError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    /// Single-line JSON text
    pub fn to_json(&self) -> String {
        match self {
            Response::Success(r) => r.to_value().to_string(),
            Response::Error(r) => r.to_value().to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}
