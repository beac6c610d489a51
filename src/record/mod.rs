//! Student record model
//!
//! A record is addressed by its composite key: `schoolId` is the partition
//! key and `studentId` the range key. Attribute names on the wire are the
//! camelCase names the store persists.

mod types;

pub use types::{fields, StudentKey, StudentRecord};
