use crate::{
    error::{Error, Result},
    store_client::{
        encode_key_value, AttributeValue, Item, Operation, Page, RequestMetricCollector, RequestMetrics,
        ScanRequest, Segment, StoreClient
    },
    table_options::{CreateTableOptions, ProvisionedThroughput}
};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::ops::Bound;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// A table held by the memory store. Records are ordered by their encoded key.
struct Table {
    partition_key: String,
    sort_key: Option<String>,
    throughput: ProvisionedThroughput,
    items: BTreeMap<Vec<u8>, Item>,
}

impl Table {
    /// Encodes the key attributes of a record, preserving key order. Errors if a key
    /// attribute is missing or of a non-key type.
    fn encode_key(&self, item: &Item) -> Result<Vec<u8>> {
        let mut key = encode_key_value(Self::key_value(item, &self.partition_key)?)?;
        if let Some(name) = &self.sort_key {
            key.extend(encode_key_value(Self::key_value(item, name)?)?);
        }
        Ok(key)
    }

    fn key_value<'a>(item: &'a Item, name: &str) -> Result<&'a AttributeValue> {
        match item.get(name) {
            Some(value) if value.is_key_type() => Ok(value),
            Some(value) => {
                Err(Error::Value(format!("Key attribute {} has invalid type {:?}", name, value)))
            }
            None => Err(Error::Value(format!("Missing key attribute {}", name))),
        }
    }

    /// Extracts the key attributes of a stored record.
    fn key_of(&self, item: &Item) -> Item {
        item.iter()
            .filter(|(name, _)| {
                **name == self.partition_key || self.sort_key.as_ref() == Some(*name)
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// Checks whether an encoded key belongs to a scan segment. Segment membership must not change
/// between runs or processes resuming a segment, so this uses FNV-1a rather than std's
/// hashers, which are randomly seeded or may change between releases.
fn in_segment(key: &[u8], segment: Option<Segment>) -> bool {
    match segment {
        None => true,
        Some(Segment { segment, total_segments }) => {
            let hash = key.iter().fold(0xcbf29ce484222325u64, |hash, byte| {
                (hash ^ *byte as u64).wrapping_mul(0x100000001b3)
            });
            hash % total_segments as u64 == segment as u64
        }
    }
}

/// Applies a projection to a record. Records holding none of the attributes become empty.
fn project(item: &Item, projection: Option<&[String]>) -> Item {
    match projection {
        None => item.clone(),
        Some(attributes) => item
            .iter()
            .filter(|(name, _)| attributes.contains(*name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
    }
}

fn report(
    collector: Option<&Arc<dyn RequestMetricCollector>>,
    operation: Operation,
    table_name: &str,
    scanned_count: usize,
    returned_count: usize,
    started: Instant,
) {
    if let Some(collector) = collector {
        collector.collect(&RequestMetrics {
            operation,
            table_name: table_name.to_string(),
            scanned_count,
            returned_count,
            elapsed: started.elapsed(),
        });
    }
}

/// An in-memory store with paginated scans. Scans walk each table in encoded key order,
/// examine at most `limit` records per call, and then apply the filter and projection, so a
/// page may carry fewer records than it examined, or none at all, while more pages remain.
pub struct MemoryStore {
    /// Tables by name, guarded by an RwLock so scans can run concurrently.
    tables: RwLock<BTreeMap<String, Table>>,
    /// Collector attached to every item write.
    metric_collector: Option<Arc<dyn RequestMetricCollector>>,
}

impl Display for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self { tables: RwLock::new(BTreeMap::new()), metric_collector: None }
    }

    /// Creates a new store reporting item writes to the given collector.
    pub fn with_metric_collector(collector: Arc<dyn RequestMetricCollector>) -> Self {
        Self { tables: RwLock::new(BTreeMap::new()), metric_collector: Some(collector) }
    }

    /// Creates a table. Errors if a table with the same name exists.
    pub fn create_table(&self, options: &CreateTableOptions) -> Result<()> {
        let started = Instant::now();
        let mut tables = self.tables.write()?;
        if tables.contains_key(options.table_name()) {
            return Err(Error::Value(format!("Table {} already exists", options.table_name())));
        }
        info!(
            "Creating table {} with partition key {} and sort key {:?}",
            options.table_name(),
            options.partition_key_name(),
            options.sort_key_name()
        );
        tables.insert(
            options.table_name().to_string(),
            Table {
                partition_key: options.partition_key_name().to_string(),
                sort_key: options.sort_key_name().map(str::to_string),
                throughput: *options.provisioned_throughput(),
                items: BTreeMap::new(),
            },
        );
        report(
            options.request_metric_collector(),
            Operation::CreateTable,
            options.table_name(),
            0,
            0,
            started,
        );
        Ok(())
    }

    /// Stores a record, replacing any record with the same key.
    pub fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        let started = Instant::now();
        let mut tables = self.tables.write()?;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| Error::Value(format!("Table {} not found", table_name)))?;
        let key = table.encode_key(&item)?;
        table.items.insert(key, item);
        report(self.metric_collector.as_ref(), Operation::PutItem, table_name, 0, 0, started);
        Ok(())
    }

    /// Deletes the record with the given key, returning it if it existed.
    pub fn delete_item(&self, table_name: &str, key: &Item) -> Result<Option<Item>> {
        let started = Instant::now();
        let mut tables = self.tables.write()?;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| Error::Value(format!("Table {} not found", table_name)))?;
        let key = table.encode_key(key)?;
        let deleted = table.items.remove(&key);
        report(self.metric_collector.as_ref(), Operation::DeleteItem, table_name, 0, 0, started);
        Ok(deleted)
    }

    /// Lists table names, in order.
    pub fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.read()?.keys().cloned().collect())
    }

    /// Returns the throughput a table was provisioned with.
    pub fn provisioned_throughput(&self, table_name: &str) -> Result<ProvisionedThroughput> {
        self.tables
            .read()?
            .get(table_name)
            .map(|table| table.throughput)
            .ok_or_else(|| Error::Value(format!("Table {} not found", table_name)))
    }

    /// Returns the number of records in a table.
    pub fn item_count(&self, table_name: &str) -> Result<usize> {
        self.tables
            .read()?
            .get(table_name)
            .map(|table| table.items.len())
            .ok_or_else(|| Error::Value(format!("Table {} not found", table_name)))
    }
}

impl StoreClient for MemoryStore {
    fn scan(&self, request: &ScanRequest) -> Result<Page> {
        let started = Instant::now();
        if request.limit() == Some(0) {
            return Err(Error::Store("Scan limit must be at least 1".into()));
        }
        let tables = self.tables.read()?;
        let table = tables
            .get(request.table_name())
            .ok_or_else(|| Error::Store(format!("Table {} not found", request.table_name())))?;

        let start = match request.exclusive_start_key() {
            Some(key) => Bound::Excluded(
                table
                    .encode_key(key)
                    .map_err(|err| Error::Store(format!("Invalid exclusive start key: {}", err)))?,
            ),
            None => Bound::Unbounded,
        };
        let mut records = table
            .items
            .range((start, Bound::Unbounded))
            .filter(|(key, _)| in_segment(key, request.segment()))
            .map(|(_, item)| item)
            .peekable();

        let limit = request.limit().unwrap_or(usize::MAX);
        let mut items = Vec::new();
        let mut scanned_count = 0;
        let mut last = None;
        while scanned_count < limit {
            let item = match records.next() {
                Some(item) => item,
                None => break,
            };
            scanned_count += 1;
            if request.filter().map_or(true, |filter| filter.matches(item)) {
                items.push(project(item, request.projection()));
            }
            last = Some(item);
        }
        let last_evaluated_key = match last {
            Some(item) if records.peek().is_some() => Some(table.key_of(item)),
            _ => None,
        };

        debug!(
            "Scanned {} records from table {} ({:?}), returning {}, more: {}",
            scanned_count,
            request.table_name(),
            request.segment(),
            items.len(),
            last_evaluated_key.is_some()
        );
        report(
            request.metric_collector(),
            Operation::Scan,
            request.table_name(),
            scanned_count,
            items.len(),
            started,
        );
        Ok(Page::new(items, last_evaluated_key).with_scanned_count(scanned_count))
    }
}
