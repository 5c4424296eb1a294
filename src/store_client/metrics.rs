use std::fmt::Debug;
use std::time::Duration;

/// A store operation reported to a metric collector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    CreateTable,
    PutItem,
    DeleteItem,
    Scan,
}

/// Metrics for a single request served by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestMetrics {
    pub operation: Operation,
    pub table_name: String,
    /// Records examined by the store, before filtering.
    pub scanned_count: usize,
    /// Records returned to the caller.
    pub returned_count: usize,
    pub elapsed: Duration,
}

/// A hook receiving metrics for every request it is attached to.
pub trait RequestMetricCollector: Debug + Send + Sync {
    fn collect(&self, metrics: &RequestMetrics);
}
