//! Store client wrapper
//!
//! Bounds every store call with a timeout and transparently retries
//! failures the store reports as transient. Callers see either the first
//! success or the last failure.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::observability::{Event, Logger};
use crate::record::{StudentKey, StudentRecord};

use super::backend::{PageRequest, ResultPage, StudentStore};
use super::errors::{StoreError, StoreResult};

/// Per-call limits applied by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Upper bound on a single attempt
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            max_retries: 5,
            retry_delay: Duration::from_millis(50),
        }
    }
}

/// Store wrapper applying [`ClientOptions`] to every call
#[derive(Debug)]
pub struct StoreClient<S> {
    inner: S,
    options: ClientOptions,
}

impl<S: StudentStore> StoreClient<S> {
    pub fn new(inner: S, options: ClientOptions) -> Self {
        Self { inner, options }
    }

    /// Returns the wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn call<T, F, Fut>(&self, operation: &str, mut attempt: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = StoreResult<T>> + Send,
    {
        let timeout_ms = self.options.timeout.as_millis() as u64;
        let mut retries = 0u32;

        loop {
            let result = match tokio::time::timeout(self.options.timeout, attempt()).await {
                Ok(result) => result,
                Err(_) => Err(StoreError::Timeout(timeout_ms)),
            };

            match result {
                Err(e) if e.is_retryable() && retries < self.options.max_retries => {
                    retries += 1;
                    let attempt_text = retries.to_string();
                    let error_text = e.to_string();
                    Logger::warn(
                        Event::StoreRetry.as_str(),
                        &[
                            ("attempt", attempt_text.as_str()),
                            ("error", error_text.as_str()),
                            ("operation", operation),
                        ],
                    );
                    if !self.options.retry_delay.is_zero() {
                        tokio::time::sleep(self.options.retry_delay).await;
                    }
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl<S: StudentStore> StudentStore for StoreClient<S> {
    async fn get(&self, table_name: &str, key: &StudentKey) -> StoreResult<Option<StudentRecord>> {
        self.call("get", || self.inner.get(table_name, key)).await
    }

    async fn query(&self, request: &PageRequest) -> StoreResult<ResultPage> {
        self.call("query", || self.inner.query(request)).await
    }

    async fn put(&self, table_name: &str, record: &StudentRecord) -> StoreResult<()> {
        self.call("put", || self.inner.put(table_name, record)).await
    }
}
