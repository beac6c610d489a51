//! Read and write handlers for roster
//!
//! Each call is one invocation: a fresh invocation id, a BEGIN/COMPLETE
//! scope, and sequential store calls. Handlers share one store handle and
//! one metrics registry.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::WriteFailurePolicy;
use crate::executor::PageAggregator;
use crate::observability::{Event, Logger, MetricsRegistry, ObservationScope};
use crate::planner::QueryPlanner;
use crate::record::StudentRecord;
use crate::store::{StudentStore, TableSchema};
use crate::validator::FieldValidator;

use super::errors::{HandlerError, HandlerResult};

/// Read entry point: plan the query, then gather every matching record
pub struct ReadHandler {
    store: Arc<dyn StudentStore>,
    schema: TableSchema,
    metrics: Arc<MetricsRegistry>,
}

impl ReadHandler {
    pub fn new(store: Arc<dyn StudentStore>, schema: TableSchema, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            store,
            schema,
            metrics,
        }
    }

    pub async fn handle(&self, query: &Value) -> HandlerResult<Vec<StudentRecord>> {
        let invocation = Uuid::new_v4().to_string();
        let scope = ObservationScope::with_fields("READ", &[("invocation", invocation.as_str())]);

        let plan = match QueryPlanner::new(&self.schema).derive_plan(query) {
            Ok(plan) => plan,
            Err(e) => {
                self.metrics.increment_reads_rejected();
                Logger::warn(
                    Event::QueryRejected.as_str(),
                    &[("code", e.code().code()), ("invocation", invocation.as_str())],
                );
                scope.fail(e.code().code());
                return Err(e.into());
            }
        };

        let described = plan.describe();
        let mut fields: Vec<(&str, &str)> = described.iter().map(|(k, v)| (*k, v.as_str())).collect();
        fields.push(("invocation", invocation.as_str()));
        Logger::info(Event::QueryPlanned.as_str(), &fields);

        let aggregator = PageAggregator::new(self.store.as_ref(), &self.metrics);
        match aggregator.fetch_all(&plan).await {
            Ok(records) => {
                self.metrics.increment_reads_served();
                self.metrics.add_records_returned(records.len() as u64);
                let count = records.len().to_string();
                scope.complete_with_fields(&[("records", count.as_str())]);
                Ok(records)
            }
            Err(e) => {
                self.metrics.increment_reads_failed();
                scope.fail(&e.to_string());
                Err(HandlerError::StoreQuery(e))
            }
        }
    }
}

/// Write entry point: validate the payload, then persist it
pub struct WriteHandler {
    store: Arc<dyn StudentStore>,
    schema: TableSchema,
    metrics: Arc<MetricsRegistry>,
    policy: WriteFailurePolicy,
}

impl WriteHandler {
    pub fn new(
        store: Arc<dyn StudentStore>,
        schema: TableSchema,
        metrics: Arc<MetricsRegistry>,
        policy: WriteFailurePolicy,
    ) -> Self {
        Self {
            store,
            schema,
            metrics,
            policy,
        }
    }

    pub fn policy(&self) -> WriteFailurePolicy {
        self.policy
    }

    pub async fn handle(&self, payload: &Value) -> HandlerResult<()> {
        let invocation = Uuid::new_v4().to_string();
        let scope = ObservationScope::with_fields("WRITE", &[("invocation", invocation.as_str())]);

        let record = match Self::accept(payload) {
            Ok(record) => record,
            Err(e) => {
                self.metrics.increment_writes_rejected();
                let reason = e.message();
                Logger::warn(
                    Event::WriteRejected.as_str(),
                    &[
                        ("code", e.code()),
                        ("invocation", invocation.as_str()),
                        ("reason", reason.as_str()),
                    ],
                );
                scope.fail(e.code());
                return Err(e);
            }
        };

        match self.store.put(&self.schema.table_name, &record).await {
            Ok(()) => {
                self.metrics.increment_writes_committed();
                Logger::info(
                    Event::WriteCommit.as_str(),
                    &[
                        ("invocation", invocation.as_str()),
                        ("school_id", record.school_id.as_str()),
                        ("student_id", record.student_id.as_str()),
                    ],
                );
                scope.complete();
                Ok(())
            }
            Err(e) => {
                self.metrics.increment_writes_failed();
                let error_text = e.to_string();
                Logger::error(
                    Event::WriteFailed.as_str(),
                    &[("error", error_text.as_str()), ("invocation", invocation.as_str())],
                );
                match self.policy {
                    WriteFailurePolicy::Surface => {
                        scope.fail(&error_text);
                        Err(HandlerError::StoreWrite(e))
                    }
                    WriteFailurePolicy::Log => {
                        scope.complete_with_fields(&[("persisted", "false")]);
                        Ok(())
                    }
                }
            }
        }
    }

    /// Runs the validation pipeline and decodes the record to persist.
    /// Keys beyond the six record attributes are dropped here.
    fn accept(payload: &Value) -> HandlerResult<StudentRecord> {
        let object = payload
            .as_object()
            .ok_or_else(|| HandlerError::invalid_request("Write payload must be a JSON object"))?;

        FieldValidator::student().validate(object)?;

        StudentRecord::deserialize(payload)
            .map_err(|e| HandlerError::invalid_request(format!("Invalid student record: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::record::StudentKey;
    use crate::store::{MemoryStore, PageRequest, ResultPage, StoreError, StoreResult};

    /// Store whose every call fails
    struct BrokenStore;

    #[async_trait]
    impl StudentStore for BrokenStore {
        async fn get(&self, _: &str, _: &StudentKey) -> StoreResult<Option<StudentRecord>> {
            Err(StoreError::Unavailable("store offline".into()))
        }

        async fn query(&self, _: &PageRequest) -> StoreResult<ResultPage> {
            Err(StoreError::Unavailable("store offline".into()))
        }

        async fn put(&self, _: &str, _: &StudentRecord) -> StoreResult<()> {
            Err(StoreError::Unavailable("store offline".into()))
        }
    }

    fn payload() -> Value {
        json!({
            "schoolId": Uuid::new_v4().to_string(),
            "schoolName": "Code Sample Academy",
            "studentId": Uuid::new_v4().to_string(),
            "studentFirstName": "Aaron",
            "studentLastName": "Test",
            "studentGrade": "12"
        })
    }

    fn handlers(
        store: Arc<dyn StudentStore>,
        policy: WriteFailurePolicy,
    ) -> (ReadHandler, WriteHandler, Arc<MetricsRegistry>) {
        let metrics = Arc::new(MetricsRegistry::new());
        let schema = TableSchema::default();
        (
            ReadHandler::new(store.clone(), schema.clone(), metrics.clone()),
            WriteHandler::new(store, schema, metrics.clone(), policy),
            metrics,
        )
    }

    #[tokio::test]
    async fn test_write_then_point_read() {
        let store = Arc::new(MemoryStore::new(TableSchema::default()));
        let (reader, writer, metrics) = handlers(store, WriteFailurePolicy::Surface);

        let input = payload();
        writer.handle(&input).await.unwrap();

        let records = reader
            .handle(&json!({ "schoolId": input["schoolId"], "studentId": input["studentId"] }))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(serde_json::to_value(&records[0]).unwrap(), input);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.writes_committed, 1);
        assert_eq!(snapshot.reads_served, 1);
        assert_eq!(snapshot.records_returned, 1);
    }

    #[tokio::test]
    async fn test_extra_keys_not_persisted() {
        let store = Arc::new(MemoryStore::new(TableSchema::default()));
        let (reader, writer, _) = handlers(store, WriteFailurePolicy::Surface);

        let mut input = payload();
        input["nickname"] = json!("Ace");
        writer.handle(&input).await.unwrap();

        let records = reader
            .handle(&json!({ "schoolId": input["schoolId"] }))
            .await
            .unwrap();
        let stored = serde_json::to_value(&records[0]).unwrap();
        assert!(stored.get("nickname").is_none());
        assert_eq!(stored.as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_rejected_write_never_reaches_store() {
        let store = Arc::new(MemoryStore::new(TableSchema::default()));
        let (_, writer, metrics) = handlers(store.clone(), WriteFailurePolicy::Surface);

        let mut input = payload();
        input["studentId"] = json!("not-a-uuid");
        let err = writer.handle(&input).await.unwrap_err();

        assert_eq!(err.code(), "ROSTER_INVALID_TYPE");
        assert_eq!(
            err.message(),
            "Input object has incorrect types for the following fields: studentId [UUID]"
        );
        assert!(store.is_empty().await);
        assert_eq!(metrics.snapshot().writes_rejected, 1);
    }

    #[tokio::test]
    async fn test_non_object_write_is_invalid_request() {
        let store = Arc::new(MemoryStore::new(TableSchema::default()));
        let (_, writer, _) = handlers(store, WriteFailurePolicy::Surface);

        let err = writer.handle(&json!(["schoolId"])).await.unwrap_err();
        assert_eq!(err.code(), "ROSTER_INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_unsupported_query_rejected() {
        let store = Arc::new(MemoryStore::new(TableSchema::default()));
        let (reader, _, metrics) = handlers(store, WriteFailurePolicy::Surface);

        let err = reader
            .handle(&json!({ "studentFirstName": "BadQueryObject" }))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Query(_)));
        assert_eq!(
            err.message(),
            "Query not supported! Your query object should supply: (schoolId, studentId) OR (studentLastName) OR (schoolId)"
        );
        assert_eq!(metrics.snapshot().reads_rejected, 1);
    }

    #[tokio::test]
    async fn test_read_store_failure_surfaces() {
        let (reader, _, metrics) = handlers(Arc::new(BrokenStore), WriteFailurePolicy::Surface);

        let err = reader.handle(&json!({ "schoolId": "s" })).await.unwrap_err();
        assert!(matches!(err, HandlerError::StoreQuery(StoreError::Unavailable(_))));
        assert_eq!(metrics.snapshot().reads_failed, 1);
    }

    #[tokio::test]
    async fn test_write_failure_policy() {
        let (_, surfacing, metrics) = handlers(Arc::new(BrokenStore), WriteFailurePolicy::Surface);
        let err = surfacing.handle(&payload()).await.unwrap_err();
        assert_eq!(err.code(), "ROSTER_STORE_WRITE_FAILED");
        assert_eq!(metrics.snapshot().writes_failed, 1);

        let (_, logging, metrics) = handlers(Arc::new(BrokenStore), WriteFailurePolicy::Log);
        assert_eq!(logging.policy(), WriteFailurePolicy::Log);
        assert!(logging.handle(&payload()).await.is_ok());
        assert_eq!(metrics.snapshot().writes_failed, 1);
        assert_eq!(metrics.snapshot().writes_committed, 0);
    }
}
