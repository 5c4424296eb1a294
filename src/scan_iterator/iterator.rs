use crate::{
    error::{Error, Result},
    scan_iterator::{RecordFactory, ScanState},
    store_client::{Item, ScanRequest, StoreClient}
};
use std::iter::FusedIterator;
use std::sync::Arc;

/// A lazy, forward-only iterator over all records of a paginated scan, converted into domain
/// objects. Buffers exactly one page, and only fetches the next page once the current one has
/// been consumed. Empty records are skipped. Not thread safe: parallel scans use one iterator
/// per segment.
pub struct PaginatedScanIterator<T, F> {
    /// The store client, shared with other scans.
    client: Arc<dyn StoreClient>,
    /// The scan request. Its exclusive start key is advanced after every fetched page.
    request: ScanRequest,
    factory: F,
    /// Converted objects of the current page that have not been returned yet.
    page: std::vec::IntoIter<T>,
    state: ScanState,
    pages_fetched: usize,
}

impl<T, F: RecordFactory<T>> PaginatedScanIterator<T, F> {
    /// Creates a new iterator. Nothing is fetched until the first call to has_more() or next.
    pub fn new(client: Arc<dyn StoreClient>, request: ScanRequest, factory: F) -> Self {
        Self {
            client,
            request,
            factory,
            page: Vec::new().into_iter(),
            state: ScanState::NotStarted,
            pages_fetched: 0,
        }
    }

    /// Checks whether another object is available, fetching pages until one is buffered or
    /// the store runs out of pages. Pages that convert to nothing don't end the scan while
    /// they carry a continuation token. A failed fetch leaves the iterator unchanged, so the
    /// call can be retried.
    pub fn has_more(&mut self) -> Result<bool> {
        while self.page.as_slice().is_empty() && self.state.has_another_page() {
            self.load_next_page()?;
        }
        Ok(!self.page.as_slice().is_empty())
    }

    /// next() with error handling.
    pub fn try_next(&mut self) -> Result<Option<T>> {
        if !self.has_more()? {
            return Ok(None);
        }
        Ok(self.page.next())
    }

    /// Returns the next object, or Error::Exhausted if the scan is done.
    pub fn next_item(&mut self) -> Result<T> {
        self.try_next()?.ok_or(Error::Exhausted)
    }

    /// Removal is not supported, the scan is read-only.
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::Unsupported("Scan iterators are read-only".into()))
    }

    /// Returns the fetch state. This is Exhausted once the last page has been fetched, even
    /// while its objects are still buffered; use has_more() to check for remaining objects.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Returns the number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns the number of objects buffered from the current page.
    pub fn buffered(&self) -> usize {
        self.page.len()
    }

    /// Returns the continuation token the next page will be fetched from, if any.
    pub fn continuation(&self) -> Option<&Item> {
        self.request.exclusive_start_key()
    }

    pub fn request(&self) -> &ScanRequest {
        &self.request
    }

    /// Fetches and converts the next page. State is only updated once the whole page has
    /// been fetched and converted.
    fn load_next_page(&mut self) -> Result<()> {
        let page = self.client.scan(&self.request)?;
        let more = page.has_more();
        let factory = &self.factory;
        let objects = page
            .items
            .into_iter()
            .filter(|item| !item.is_empty())
            .map(|item| factory.create(item))
            .collect::<Result<Vec<_>>>()?;
        let token = if more { page.last_evaluated_key } else { None };

        self.state = match token {
            Some(_) => ScanState::InProgress,
            None => ScanState::Exhausted,
        };
        self.request.set_exclusive_start_key(token);
        self.page = objects.into_iter();
        self.pages_fetched += 1;
        Ok(())
    }
}

impl<T, F: RecordFactory<T>> Iterator for PaginatedScanIterator<T, F> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.page.len();
        match self.state {
            ScanState::Exhausted => (buffered, Some(buffered)),
            _ => (buffered, None),
        }
    }
}

impl<T, F: RecordFactory<T>> FusedIterator for PaginatedScanIterator<T, F> {}
