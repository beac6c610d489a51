//! Metrics registry for roster
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the read and write handlers
///
/// All counters use Relaxed atomics; exact cross-counter consistency is
/// not required.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Reads that returned a result
    reads_served: AtomicU64,
    /// Reads rejected for an unsupported query shape
    reads_rejected: AtomicU64,
    /// Reads aborted by a store failure
    reads_failed: AtomicU64,
    /// Pages returned by range queries
    pages_fetched: AtomicU64,
    /// Records returned across all reads
    records_returned: AtomicU64,
    /// Records persisted
    writes_committed: AtomicU64,
    /// Writes rejected by validation
    writes_rejected: AtomicU64,
    /// Writes whose persist step failed
    writes_failed: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Read metrics

    pub fn increment_reads_served(&self) {
        self.reads_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads_rejected(&self) {
        self.reads_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads_failed(&self) {
        self.reads_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pages_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_records_returned(&self, count: u64) {
        self.records_returned.fetch_add(count, Ordering::Relaxed);
    }

    // Write metrics

    pub fn increment_writes_committed(&self) {
        self.writes_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_rejected(&self) {
        self.writes_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_failed(&self) {
        self.writes_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reads_served: self.reads_served.load(Ordering::Relaxed),
            reads_rejected: self.reads_rejected.load(Ordering::Relaxed),
            reads_failed: self.reads_failed.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            records_returned: self.records_returned.load(Ordering::Relaxed),
            writes_committed: self.writes_committed.load(Ordering::Relaxed),
            writes_rejected: self.writes_rejected.load(Ordering::Relaxed),
            writes_failed: self.writes_failed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub reads_served: u64,
    pub reads_rejected: u64,
    pub reads_failed: u64,
    pub pages_fetched: u64,
    pub records_returned: u64,
    pub writes_committed: u64,
    pub writes_rejected: u64,
    pub writes_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_reads_served();
        registry.increment_pages_fetched();
        registry.increment_pages_fetched();
        registry.add_records_returned(7);
        registry.increment_writes_rejected();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.reads_served, 1);
        assert_eq!(snapshot.pages_fetched, 2);
        assert_eq!(snapshot.records_returned, 7);
        assert_eq!(snapshot.writes_rejected, 1);
        assert_eq!(snapshot.writes_committed, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_writes_committed();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["writes_committed"], 1);
        assert_eq!(json["reads_failed"], 0);
    }

    #[test]
    fn test_thread_safe_increments() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let r = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        r.increment_reads_served();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(registry.snapshot().reads_served, 400);
    }
}
