//! # Store Backend Trait

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::record::{StudentKey, StudentRecord};

use super::errors::StoreResult;

/// Equality condition on a partition key attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    attribute: String,
    value: String,
}

impl KeyCondition {
    /// `attribute = :attribute`, bound to `value`
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Bound value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Placeholder name the value is bound to, e.g. `:schoolId`
    pub fn placeholder(&self) -> String {
        format!(":{}", self.attribute)
    }

    /// Condition expression text, e.g. `schoolId = :schoolId`
    pub fn expression(&self) -> String {
        format!("{} = {}", self.attribute, self.placeholder())
    }
}

/// Continuation token returned with a page that may not be the last.
///
/// Carries the primary key of the last item returned; queries against the
/// last-name index also carry that item's index key attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastEvaluatedKey {
    pub school_id: String,
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_first_name: Option<String>,
}

impl LastEvaluatedKey {
    /// Token positioned on `record` in primary key order
    pub fn primary(record: &StudentRecord) -> Self {
        Self {
            school_id: record.school_id.clone(),
            student_id: record.student_id.clone(),
            student_last_name: None,
            student_first_name: None,
        }
    }

    /// Token positioned on `record` in last-name index order
    pub fn last_name_index(record: &StudentRecord) -> Self {
        Self {
            student_last_name: Some(record.student_last_name.clone()),
            student_first_name: Some(record.student_first_name.clone()),
            ..Self::primary(record)
        }
    }
}

/// One bounded query against the table or an index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub table_name: String,
    /// Secondary index to query; `None` queries the table itself
    pub index_name: Option<String>,
    pub key_condition: KeyCondition,
    /// Maximum number of items evaluated for this page
    pub limit: usize,
    /// Resume strictly after this position
    pub exclusive_start_key: Option<LastEvaluatedKey>,
}

/// Items returned by one query, in store order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub items: Vec<StudentRecord>,
    pub last_evaluated_key: Option<LastEvaluatedKey>,
}

impl ResultPage {
    /// A page without a continuation token ends the result set
    pub fn is_last(&self) -> bool {
        self.last_evaluated_key.is_none()
    }
}

/// Key/range store holding student records
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Fetch one record by its full composite key
    async fn get(&self, table_name: &str, key: &StudentKey) -> StoreResult<Option<StudentRecord>>;

    /// Fetch one page of records matching a key condition
    async fn query(&self, request: &PageRequest) -> StoreResult<ResultPage>;

    /// Unconditionally write a record, replacing any record with the same key
    async fn put(&self, table_name: &str, record: &StudentRecord) -> StoreResult<()>;
}

#[async_trait]
impl<T: StudentStore + ?Sized> StudentStore for Arc<T> {
    async fn get(&self, table_name: &str, key: &StudentKey) -> StoreResult<Option<StudentRecord>> {
        (**self).get(table_name, key).await
    }

    async fn query(&self, request: &PageRequest) -> StoreResult<ResultPage> {
        (**self).query(request).await
    }

    async fn put(&self, table_name: &str, record: &StudentRecord) -> StoreResult<()> {
        (**self).put(table_name, record).await
    }
}
