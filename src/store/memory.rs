//! In-memory student store
//!
//! Items are kept in primary key order. Table queries walk one partition in
//! `studentId` order; last-name index queries walk matching items in
//! `studentFirstName` order, ties broken by primary key.
//!
//! A page is cut after `limit` items. Whenever a page is cut at the limit it
//! carries a continuation token, even if nothing follows; the next query then
//! returns an empty final page.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::record::{fields, StudentKey, StudentRecord};

use super::backend::{LastEvaluatedKey, PageRequest, ResultPage, StudentStore};
use super::errors::{StoreError, StoreResult};

/// Names of the table and its last-name index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub last_name_index: String,
}

impl TableSchema {
    pub fn new(table_name: impl Into<String>, last_name_index: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            last_name_index: last_name_index.into(),
        }
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::new("SchoolStudents", "studentLastNameGsi")
    }
}

/// Store backed by an ordered map
#[derive(Debug)]
pub struct MemoryStore {
    schema: TableSchema,
    items: RwLock<BTreeMap<StudentKey, StudentRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store holding the records in `path`; empty if the file does not exist
    pub async fn load(schema: TableSchema, path: &Path) -> StoreResult<Self> {
        let store = Self::new(schema);

        let content = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(store),
            Err(e) => {
                return Err(StoreError::DataFile(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let records: Vec<StudentRecord> = serde_json::from_slice(&content).map_err(|e| {
            StoreError::DataFile(format!("Invalid data file {}: {}", path.display(), e))
        })?;

        {
            let mut items = store.items.write().await;
            for record in records {
                items.insert(record.key(), record);
            }
        }

        Ok(store)
    }

    /// Write all records to `path` in primary key order.
    ///
    /// Writes a sibling temp file first and renames it into place.
    pub async fn save(&self, path: &Path) -> StoreResult<()> {
        let records: Vec<StudentRecord> = self.items.read().await.values().cloned().collect();
        let bytes = serde_json::to_vec_pretty(&records)
            .map_err(|e| StoreError::DataFile(format!("Failed to encode records: {}", e)))?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::DataFile(format!("Failed to write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| StoreError::DataFile(format!("Failed to replace {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn check_table(&self, table_name: &str) -> StoreResult<()> {
        if table_name != self.schema.table_name {
            return Err(StoreError::ResourceNotFound(format!("Table: {}", table_name)));
        }
        Ok(())
    }

    /// Matching items for a table query, in `studentId` order
    fn table_candidates(
        items: &BTreeMap<StudentKey, StudentRecord>,
        request: &PageRequest,
    ) -> StoreResult<Vec<StudentRecord>> {
        let cond = &request.key_condition;
        if cond.attribute() != fields::SCHOOL_ID {
            return Err(StoreError::Validation(format!(
                "Query key condition not supported: {}",
                cond.expression()
            )));
        }

        let after = request
            .exclusive_start_key
            .as_ref()
            .map(|start| start.student_id.as_str());

        Ok(items
            .values()
            .filter(|r| r.school_id == cond.value())
            .filter(|r| after.map_or(true, |id| r.student_id.as_str() > id))
            .cloned()
            .collect())
    }

    /// Matching items for a last-name index query, in index order
    fn index_candidates(
        items: &BTreeMap<StudentKey, StudentRecord>,
        request: &PageRequest,
    ) -> StoreResult<Vec<StudentRecord>> {
        let cond = &request.key_condition;
        if cond.attribute() != fields::STUDENT_LAST_NAME {
            return Err(StoreError::Validation(format!(
                "Query key condition not supported: {}",
                cond.expression()
            )));
        }

        let after = match &request.exclusive_start_key {
            Some(start) => {
                let first_name = start.student_first_name.as_deref().ok_or_else(|| {
                    StoreError::Validation("Exclusive start key is missing index attributes".into())
                })?;
                Some((first_name, start.school_id.as_str(), start.student_id.as_str()))
            }
            None => None,
        };

        let mut matches: Vec<&StudentRecord> = items
            .values()
            .filter(|r| r.student_last_name == cond.value())
            .collect();
        matches.sort_by(|a, b| index_position(a).cmp(&index_position(b)));

        Ok(matches
            .into_iter()
            .filter(|r| after.map_or(true, |pos| index_position(r) > pos))
            .cloned()
            .collect())
    }
}

fn index_position(record: &StudentRecord) -> (&str, &str, &str) {
    (
        record.student_first_name.as_str(),
        record.school_id.as_str(),
        record.student_id.as_str(),
    )
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn get(&self, table_name: &str, key: &StudentKey) -> StoreResult<Option<StudentRecord>> {
        self.check_table(table_name)?;
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn query(&self, request: &PageRequest) -> StoreResult<ResultPage> {
        self.check_table(&request.table_name)?;

        if request.limit == 0 {
            return Err(StoreError::Validation("Limit must be greater than 0".into()));
        }

        let items = self.items.read().await;
        let (candidates, via_index) = match request.index_name.as_deref() {
            None => (Self::table_candidates(&items, request)?, false),
            Some(index) if index == self.schema.last_name_index => {
                (Self::index_candidates(&items, request)?, true)
            }
            Some(index) => {
                return Err(StoreError::ResourceNotFound(format!("Index: {}", index)));
            }
        };

        let page: Vec<StudentRecord> = candidates.into_iter().take(request.limit).collect();

        let last_evaluated_key = if page.len() == request.limit {
            page.last().map(|last| {
                if via_index {
                    LastEvaluatedKey::last_name_index(last)
                } else {
                    LastEvaluatedKey::primary(last)
                }
            })
        } else {
            None
        };

        Ok(ResultPage {
            items: page,
            last_evaluated_key,
        })
    }

    async fn put(&self, table_name: &str, record: &StudentRecord) -> StoreResult<()> {
        self.check_table(table_name)?;
        self.items.write().await.insert(record.key(), record.clone());
        Ok(())
    }
}
