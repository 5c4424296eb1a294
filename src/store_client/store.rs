use crate::{
    error::Result,
    store_client::{Page, ScanRequest}
};

/// A store client serving paginated scans. Each call fetches exactly one page, starting after
/// the request's exclusive start key. Clients are shared by reference between scans, so they
/// must handle their own synchronization, retries and timeouts.
pub trait StoreClient: Send + Sync {
    /// Fetches one page of raw records.
    fn scan(&self, request: &ScanRequest) -> Result<Page>;
}
