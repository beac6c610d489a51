//! Read Path Tests
//!
//! End-to-end reads through `ReadHandler` over the in-memory store:
//! - Point lookups return zero or one record
//! - Range queries gather every page in store order
//! - Last-name queries go through the secondary index
//! - Store failures on any page fail the whole read

use std::sync::Arc;

use async_trait::async_trait;
use roster::api::{HandlerError, ReadHandler};
use roster::observability::MetricsRegistry;
use roster::record::{StudentKey, StudentRecord};
use roster::store::{
    ClientOptions, MemoryStore, PageRequest, ResultPage, StoreClient, StoreError, StoreResult,
    StudentStore, TableSchema,
};
use serde_json::json;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn student(school_id: &str, first: &str, last: &str) -> StudentRecord {
    StudentRecord {
        school_id: school_id.to_string(),
        school_name: "Code Sample Academy".to_string(),
        student_id: Uuid::new_v4().to_string(),
        student_first_name: first.to_string(),
        student_last_name: last.to_string(),
        student_grade: "7".to_string(),
    }
}

async fn seeded_store(records: &[StudentRecord]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new(TableSchema::default()));
    for record in records {
        store.put("SchoolStudents", record).await.unwrap();
    }
    store
}

fn reader(store: Arc<dyn StudentStore>) -> (ReadHandler, Arc<MetricsRegistry>) {
    let metrics = Arc::new(MetricsRegistry::new());
    (
        ReadHandler::new(store, TableSchema::default(), Arc::clone(&metrics)),
        metrics,
    )
}

/// Delegates to a memory store, failing the query that asks for page `fail_on`
struct FailingPageStore {
    inner: MemoryStore,
    fail_on: usize,
    queries: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl StudentStore for FailingPageStore {
    async fn get(&self, table: &str, key: &StudentKey) -> StoreResult<Option<StudentRecord>> {
        self.inner.get(table, key).await
    }

    async fn query(&self, request: &PageRequest) -> StoreResult<ResultPage> {
        let page = self.queries.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
        if page == self.fail_on {
            return Err(StoreError::Validation("page rejected".into()));
        }
        self.inner.query(request).await
    }

    async fn put(&self, table: &str, record: &StudentRecord) -> StoreResult<()> {
        self.inner.put(table, record).await
    }
}

// =============================================================================
// Point Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_point_lookup_returns_single_record() {
    let school = Uuid::new_v4().to_string();
    let records: Vec<_> = (0..3).map(|i| student(&school, &format!("F{}", i), "Test")).collect();
    let store = seeded_store(&records).await;
    let (reader, _) = reader(store);

    let result = reader
        .handle(&json!({ "schoolId": school, "studentId": records[1].student_id }))
        .await
        .unwrap();
    assert_eq!(result, vec![records[1].clone()]);
}

#[tokio::test]
async fn test_point_lookup_miss_is_empty() {
    let store = seeded_store(&[]).await;
    let (reader, metrics) = reader(store);

    let result = reader
        .handle(&json!({ "schoolId": "SomeSchoolId", "studentId": "SomeStudentId" }))
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(metrics.snapshot().reads_served, 1);
    assert_eq!(metrics.snapshot().pages_fetched, 0);
}

// =============================================================================
// Range Query Tests
// =============================================================================

/// Ten records at page size five: two full pages and an empty final page.
#[tokio::test]
async fn test_school_query_gathers_all_pages() {
    let school = Uuid::new_v4().to_string();
    let mut records: Vec<_> = (0..10).map(|i| student(&school, &format!("F{}", i), "Test")).collect();
    records.push(student(&Uuid::new_v4().to_string(), "Other", "School"));
    let store = seeded_store(&records).await;
    let (reader, metrics) = reader(store);

    let result = reader.handle(&json!({ "schoolId": school })).await.unwrap();

    let mut expected: Vec<_> = records[..10].to_vec();
    expected.sort_by(|a, b| a.student_id.cmp(&b.student_id));
    assert_eq!(result, expected);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.pages_fetched, 3);
    assert_eq!(snapshot.records_returned, 10);
}

#[tokio::test]
async fn test_last_name_query_uses_index_order() {
    let names = ["Mia", "Ann", "Zoe", "Bea", "Kim", "Eve", "Liv"];
    let mut records = Vec::new();
    for name in names {
        records.push(student(&Uuid::new_v4().to_string(), name, "Smith"));
    }
    records.push(student(&Uuid::new_v4().to_string(), "Amy", "Jones"));
    let store = seeded_store(&records).await;
    let (reader, _) = reader(store);

    let result = reader
        .handle(&json!({ "studentLastName": "Smith", "schoolId": "ignored" }))
        .await
        .unwrap();

    let firsts: Vec<_> = result.iter().map(|r| r.student_first_name.as_str()).collect();
    assert_eq!(firsts, ["Ann", "Bea", "Eve", "Kim", "Liv", "Mia", "Zoe"]);
}

#[tokio::test]
async fn test_unmatched_partition_is_empty() {
    let store = seeded_store(&[student("a", "F", "L")]).await;
    let (reader, _) = reader(store);

    let result = reader.handle(&json!({ "schoolId": "b" })).await.unwrap();
    assert!(result.is_empty());
}

// =============================================================================
// Failure Tests
// =============================================================================

#[tokio::test]
async fn test_second_page_failure_fails_read() {
    let school = "school";
    let inner = MemoryStore::new(TableSchema::default());
    for i in 0..8 {
        inner
            .put("SchoolStudents", &student(school, &format!("F{}", i), "L"))
            .await
            .unwrap();
    }
    let store = Arc::new(FailingPageStore {
        inner,
        fail_on: 2,
        queries: Default::default(),
    });
    let (reader, metrics) = reader(store);

    let err = reader.handle(&json!({ "schoolId": school })).await.unwrap_err();
    assert!(matches!(err, HandlerError::StoreQuery(StoreError::Validation(_))));
    assert_eq!(err.code(), "ROSTER_STORE_QUERY_FAILED");
    assert_eq!(metrics.snapshot().reads_failed, 1);
    assert_eq!(metrics.snapshot().records_returned, 0);
}

#[tokio::test]
async fn test_unsupported_query_never_touches_store() {
    let store = Arc::new(FailingPageStore {
        inner: MemoryStore::new(TableSchema::default()),
        fail_on: 1,
        queries: Default::default(),
    });
    let (reader, _) = reader(store.clone());

    let err = reader
        .handle(&json!({ "studentFirstName": "BadQueryObject" }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ROSTER_QUERY_UNSUPPORTED");
    assert_eq!(store.queries.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reads_through_store_client() {
    let school = Uuid::new_v4().to_string();
    let records: Vec<_> = (0..6).map(|i| student(&school, &format!("F{}", i), "L")).collect();
    let memory = seeded_store(&records).await;
    let client = StoreClient::new(memory, ClientOptions::default());
    let (reader, _) = reader(Arc::new(client));

    let result = reader.handle(&json!({ "schoolId": school })).await.unwrap();
    assert_eq!(result.len(), 6);
}
