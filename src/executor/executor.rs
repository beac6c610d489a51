//! Page aggregator for roster
//!
//! Drives paged queries until the store stops returning a continuation
//! token and flattens the pages into one sequence.

use crate::observability::{Event, Logger, MetricsRegistry};
use crate::planner::{QueryPlan, RangeQuery};
use crate::record::StudentRecord;
use crate::store::{LastEvaluatedKey, StoreResult, StudentStore};

/// Cursor over the pages of one range query.
///
/// Position only advances after a page arrives, so a failed `next_page`
/// can be called again and retries the same page.
pub struct PageCursor<'a> {
    store: &'a dyn StudentStore,
    query: &'a RangeQuery,
    start: Option<LastEvaluatedKey>,
    exhausted: bool,
    pages: usize,
}

impl<'a> PageCursor<'a> {
    pub fn new(store: &'a dyn StudentStore, query: &'a RangeQuery) -> Self {
        Self {
            store,
            query,
            start: None,
            exhausted: false,
            pages: 0,
        }
    }

    /// Fetches the next page, or `None` once the final page was returned
    pub async fn next_page(&mut self) -> StoreResult<Option<Vec<StudentRecord>>> {
        if self.exhausted {
            return Ok(None);
        }

        let request = self.query.page_request(self.start.clone());
        let page = self.store.query(&request).await?;

        self.pages += 1;
        self.exhausted = page.is_last();
        self.start = page.last_evaluated_key;

        let page_text = self.pages.to_string();
        let items_text = page.items.len().to_string();
        Logger::info(
            Event::PageFetched.as_str(),
            &[
                ("items", items_text.as_str()),
                ("last", if self.exhausted { "true" } else { "false" }),
                ("page", page_text.as_str()),
            ],
        );

        Ok(Some(page.items))
    }

    /// Rewinds to the first page
    pub fn restart(&mut self) {
        self.start = None;
        self.exhausted = false;
        self.pages = 0;
    }

    /// Pages returned so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Executes read plans against a store
pub struct PageAggregator<'a> {
    store: &'a dyn StudentStore,
    metrics: &'a MetricsRegistry,
}

impl<'a> PageAggregator<'a> {
    pub fn new(store: &'a dyn StudentStore, metrics: &'a MetricsRegistry) -> Self {
        Self { store, metrics }
    }

    /// Returns every record matching the plan, in store order.
    ///
    /// A point lookup miss yields an empty sequence. Any failed page fails
    /// the whole read.
    pub async fn fetch_all(&self, plan: &QueryPlan) -> StoreResult<Vec<StudentRecord>> {
        match plan {
            QueryPlan::PointLookup(lookup) => {
                let record = self.store.get(&lookup.table_name, &lookup.key).await?;
                Ok(record.into_iter().collect())
            }
            QueryPlan::RangeQuery(query) => self.drain(PageCursor::new(self.store, query)).await,
        }
    }

    async fn drain(&self, mut cursor: PageCursor<'_>) -> StoreResult<Vec<StudentRecord>> {
        let mut records = Vec::new();

        loop {
            match cursor.next_page().await {
                Ok(Some(items)) => {
                    self.metrics.increment_pages_fetched();
                    records.extend(items);
                }
                Ok(None) => return Ok(records),
                Err(e) => {
                    let page_text = (cursor.pages_fetched() + 1).to_string();
                    let discarded_text = records.len().to_string();
                    let error_text = e.to_string();
                    Logger::error(
                        Event::QueryFailed.as_str(),
                        &[
                            ("discarded", discarded_text.as_str()),
                            ("error", error_text.as_str()),
                            ("page", page_text.as_str()),
                        ],
                    );
                    return Err(e);
                }
            }
        }
    }
}
