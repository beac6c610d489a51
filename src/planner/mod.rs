//! Query planner for student reads
//!
//! Derives a store request from a loosely-typed query object.
//!
//! # Shape Selection (strict order, first match wins)
//!
//! 1. `schoolId` + `studentId` → point lookup on the primary key
//! 2. `studentLastName` → range query on the last-name index
//! 3. `schoolId` → range query on the table partition
//!
//! Anything else is rejected. Range queries always page 5 items at a time.

mod errors;
mod planner;
mod request;

pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use planner::{PointLookup, QueryPlan, QueryPlanner, RangeQuery, PAGE_LIMIT};
pub use request::QueryRequest;
