//! Lazy, page-at-a-time traversal of full-table scans against a paginated key-value store.
//!
//! A [`PaginatedScanIterator`] hides the store's pagination behind a single forward-only
//! iterator: it fetches a page only once the previous one has been consumed, skips empty
//! records, and converts the rest into domain objects through a [`RecordFactory`].
//!
//! ```no_run
//! use scanpager::error::Result;
//! use scanpager::{Item, MemoryStore, PaginatedScanIterator, ScanRequest};
//! use std::sync::Arc;
//!
//! fn owners(store: Arc<MemoryStore>) -> Result<Vec<String>> {
//!     let factory = |item: Item| -> Result<String> {
//!         Ok(item.get("owner").and_then(|v| v.as_s()).unwrap_or_default().to_string())
//!     };
//!     PaginatedScanIterator::new(store, ScanRequest::new("locks").with_limit(100), factory)
//!         .collect()
//! }
//! ```

pub mod error;
pub mod scan_iterator;
pub mod store_client;
pub mod table_options;
pub mod thread_naming;

pub use scan_iterator::{
    decode_token, encode_token, PaginatedScanIterator, RecordFactory, ScanState, SegmentedScan
};
pub use store_client::{
    AttributeValue, Filter, Item, MemoryStore, Page, RequestMetricCollector, RequestMetrics,
    ScanRequest, StoreClient
};
pub use table_options::{CreateTableOptions, CreateTableOptionsBuilder, ProvisionedThroughput};
pub use thread_naming::{NamedThreadCreator, PrefixedThreadCreator};
