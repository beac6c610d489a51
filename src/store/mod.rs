//! Student store subsystem
//!
//! The store is a key/range store with one secondary index:
//!
//! - primary key: `schoolId` (partition) + `studentId` (range)
//! - last-name index: `studentLastName` (partition) + `studentFirstName` (range)
//!
//! Supported operations are a point get, a bounded page query with
//! continuation, and an unconditional put.

mod backend;
mod client;
mod errors;
mod memory;

pub use backend::{KeyCondition, LastEvaluatedKey, PageRequest, ResultPage, StudentStore};
pub use client::{ClientOptions, StoreClient};
pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryStore, TableSchema};
