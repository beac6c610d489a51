//! roster - validated storage and paged queries for student records
//!
//! Reads derive a point lookup or a paged range query from a loose query
//! object and gather every page. Writes pass a three-stage field validator
//! before a single unconditional put.

pub mod api;
pub mod cli;
pub mod config;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod record;
pub mod store;
pub mod validator;
