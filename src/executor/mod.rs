//! Page aggregation for roster reads
//!
//! Executes a [`QueryPlan`](crate::planner::QueryPlan) against a store.
//!
//! # Execution Flow
//!
//! 1. Point lookup: one `get`, zero or one record
//! 2. Range query: first page with the plan's page limit
//! 3. While the page carries a continuation token, query again starting
//!    strictly after it
//! 4. Stop at the first page without a token
//!
//! Pages are fetched strictly one after another and items keep store
//! order. A failed page aborts the read and discards everything gathered
//! so far.

mod executor;

pub use executor::{PageAggregator, PageCursor};
