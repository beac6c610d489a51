//! Invocation entry points for roster
//!
//! # Read path
//!
//! query object → QueryPlanner → PageAggregator → records
//!
//! # Write path
//!
//! payload → FieldValidator (presence → type/format → non-empty) → put
//!
//! Planner and validator error codes pass through unchanged. Store
//! failures are wrapped as `ROSTER_STORE_QUERY_FAILED` or
//! `ROSTER_STORE_WRITE_FAILED`.

mod errors;
mod handler;
mod response;

pub use errors::{HandlerError, HandlerResult, Severity};
pub use handler::{ReadHandler, WriteHandler};
pub use response::{ErrorResponse, Response, SuccessResponse};
