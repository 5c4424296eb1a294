use log::{debug, error};
use crate::{
    error::{Error, Result},
    scan_iterator::{PaginatedScanIterator, RecordFactory},
    store_client::{ScanRequest, StoreClient},
    thread_naming::NamedThreadCreator
};
use std::sync::Arc;
use std::thread;

/// A parallel scan, split into segments. Every segment is driven by its own iterator on its own
/// named thread; segments share nothing but the store client.
pub struct SegmentedScan<F> {
    client: Arc<dyn StoreClient>,
    request: ScanRequest,
    total_segments: u32,
    factory: F,
    threads: Arc<dyn NamedThreadCreator>,
}

impl<F> SegmentedScan<F> {
    /// Creates a new segmented scan. The request must not already be restricted to a segment.
    pub fn new(
        client: Arc<dyn StoreClient>,
        request: ScanRequest,
        total_segments: u32,
        factory: F,
        threads: Arc<dyn NamedThreadCreator>,
    ) -> Self {
        Self { client, request, total_segments, factory, threads }
    }

    /// Passes every object of every segment to the handler, concurrently across segments.
    /// Returns the error of the lowest failing segment, once all segments have stopped.
    pub fn for_each<T, H>(&self, handler: H) -> Result<()>
    where
        T: Send,
        F: RecordFactory<T> + Clone + Send,
        H: Fn(T) -> Result<()> + Sync,
    {
        self.run(|scan| {
            for object in scan {
                handler(object?)?;
            }
            Ok(())
        })
        .map(|_| ())
    }

    /// Collects all objects, in segment order and then scan order within each segment.
    pub fn collect<T>(&self) -> Result<Vec<T>>
    where
        T: Send,
        F: RecordFactory<T> + Clone + Send,
    {
        let segments = self.run(|scan| scan.collect::<Result<Vec<T>>>())?;
        Ok(segments.into_iter().flatten().collect())
    }

    /// Runs the worker on one thread per segment, and joins all of them.
    fn run<T, R, W>(&self, worker: W) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: RecordFactory<T> + Clone + Send,
        W: Fn(PaginatedScanIterator<T, F>) -> Result<R> + Sync,
    {
        let requests = self.request.segments(self.total_segments)?;
        let worker = &worker;
        thread::scope(|scope| -> Result<Vec<R>> {
            let mut handles = Vec::with_capacity(requests.len());
            for (segment, request) in requests.into_iter().enumerate() {
                let name = format!("{}-segment-{}", request.table_name(), segment);
                let scan =
                    PaginatedScanIterator::new(self.client.clone(), request, self.factory.clone());
                let handle = self
                    .threads
                    .create_thread_with_name(&name)
                    .spawn_scoped(scope, move || {
                        debug!("Starting scan of segment {}", segment);
                        let result = worker(scan);
                        debug!("Finished scan of segment {}", segment);
                        result
                    })
                    .map_err(|err| Error::Internal(format!("Failed to spawn {}: {}", name, err)))?;
                handles.push(handle);
            }

            let mut results = Vec::with_capacity(handles.len());
            let mut failure = None;
            for (segment, handle) in handles.into_iter().enumerate() {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(Error::Internal(format!("Scan of segment {} panicked", segment)))
                });
                match result {
                    Ok(r) => results.push(r),
                    Err(err) => {
                        error!("Scan of segment {} failed: {}", segment, err);
                        failure.get_or_insert(err);
                    }
                }
            }
            match failure {
                Some(err) => Err(err),
                None => Ok(results),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        store_client::{item, Filter, Item, MemoryStore, Page, ScriptedStore},
        table_options::{CreateTableOptions, ProvisionedThroughput},
        thread_naming::PrefixedThreadCreator
    };
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn key_of(item: Item) -> Result<String> {
        match item.get("key").and_then(|v| v.as_s()) {
            Some(key) => Ok(key.to_string()),
            None => Err(Error::Conversion("Record has no key".into())),
        }
    }

    fn setup(count: usize) -> Result<Arc<MemoryStore>> {
        let store = Arc::new(MemoryStore::new());
        store.create_table(
            &CreateTableOptions::builder(ProvisionedThroughput::new(1, 1), "locks").build()?,
        )?;
        for i in 0..count {
            store.put_item("locks", item(&[("key", format!("lock-{:02}", i).as_str())]))?;
        }
        Ok(store)
    }

    fn expected(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("lock-{:02}", i)).collect()
    }

    #[test]
    fn collect() -> Result<()> {
        let store = setup(40)?;
        let scan = SegmentedScan::new(
            store,
            ScanRequest::new("locks").with_limit(3),
            4,
            key_of as fn(Item) -> Result<String>,
            Arc::new(PrefixedThreadCreator::default()),
        );
        let mut keys: Vec<String> = scan.collect()?;
        keys.sort();
        assert_eq!(expected(40), keys);
        Ok(())
    }

    #[test]
    fn for_each_on_named_threads() -> Result<()> {
        let store = setup(20)?;
        let seen = Mutex::new(Vec::new());
        let scan = SegmentedScan::new(
            store,
            ScanRequest::new("locks").with_limit(2),
            3,
            key_of as fn(Item) -> Result<String>,
            Arc::new(PrefixedThreadCreator::new("test")),
        );
        scan.for_each(|key: String| {
            let thread = thread::current().name().unwrap_or_default().to_string();
            seen.lock()?.push((key, thread));
            Ok(())
        })?;

        let mut seen = seen.into_inner()?;
        seen.sort();
        assert_eq!(expected(20), seen.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>());
        assert!(seen.iter().all(|(_, t)| t.starts_with("test-locks-segment-")));
        Ok(())
    }

    #[test]
    fn single_segment_keeps_order() -> Result<()> {
        let store = setup(7)?;
        let scan = SegmentedScan::new(
            store,
            ScanRequest::new("locks")
                .with_limit(2)
                .with_filter(Filter::Not(Box::new(Filter::Equals(
                    "key".into(),
                    "lock-03".into(),
                )))),
            1,
            key_of as fn(Item) -> Result<String>,
            Arc::new(PrefixedThreadCreator::default()),
        );
        let mut expected = expected(7);
        expected.remove(3);
        assert_eq!(expected, scan.collect::<String>()?);
        Ok(())
    }

    #[test]
    fn handler_error() -> Result<()> {
        let store = setup(10)?;
        let scan = SegmentedScan::new(
            store,
            ScanRequest::new("locks"),
            2,
            key_of as fn(Item) -> Result<String>,
            Arc::new(PrefixedThreadCreator::default()),
        );
        assert_eq!(
            Err(Error::Value("Rejected".into())),
            scan.for_each(|_: String| Err(Error::Value("Rejected".into())))
        );
        Ok(())
    }

    #[test]
    fn store_error() {
        let store = Arc::new(ScriptedStore::new(vec![
            Ok(Page::new(vec![item(&[("key", "a")])], None)),
            Err(Error::Store("Throttled".into())),
        ]));
        let scan = SegmentedScan::new(
            store,
            ScanRequest::new("locks"),
            2,
            key_of as fn(Item) -> Result<String>,
            Arc::new(PrefixedThreadCreator::default()),
        );
        // Which segment hits the error depends on scheduling.
        assert_eq!(Err(Error::Store("Throttled".into())), scan.collect::<String>());
    }

    #[test]
    fn invalid_segments() {
        let scan = SegmentedScan::new(
            Arc::new(ScriptedStore::default()),
            ScanRequest::new("locks"),
            0,
            key_of as fn(Item) -> Result<String>,
            Arc::new(PrefixedThreadCreator::default()),
        );
        assert_eq!(
            Err(Error::Config("Total segments must be at least 1".into())),
            scan.collect::<String>()
        );
    }
}
