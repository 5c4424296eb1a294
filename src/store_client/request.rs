use crate::{
    error::{Error, Result},
    store_client::{Filter, Item, RequestMetricCollector}
};
use std::sync::Arc;

/// A segment of a parallel scan: the store only returns records belonging to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub segment: u32,
    pub total_segments: u32,
}

/// A scan request. Everything but the exclusive start key is fixed once the scan begins; the
/// start key is advanced by the scan iterator as pages are fetched.
#[derive(Clone, Debug)]
pub struct ScanRequest {
    table_name: String,
    filter: Option<Filter>,
    /// Maximum number of records the store examines per call, before filtering.
    limit: Option<usize>,
    /// Attributes to return. Records holding none of them come back empty.
    projection: Option<Vec<String>>,
    segment: Option<Segment>,
    metric_collector: Option<Arc<dyn RequestMetricCollector>>,
    exclusive_start_key: Option<Item>,
}

impl ScanRequest {
    /// Creates a request scanning the whole table.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            filter: None,
            limit: None,
            projection: None,
            segment: None,
            metric_collector: None,
            exclusive_start_key: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_projection<S, I>(mut self, attributes: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.projection = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the request to one segment of a parallel scan.
    pub fn with_segment(mut self, segment: u32, total_segments: u32) -> Result<Self> {
        if total_segments == 0 {
            return Err(Error::Config("Total segments must be at least 1".into()));
        }
        if segment >= total_segments {
            return Err(Error::Config(format!(
                "Segment {} out of range for {} total segments",
                segment, total_segments
            )));
        }
        self.segment = Some(Segment { segment, total_segments });
        Ok(self)
    }

    pub fn with_metric_collector(mut self, collector: Arc<dyn RequestMetricCollector>) -> Self {
        self.metric_collector = Some(collector);
        self
    }

    /// Resumes the scan after the given key, e.g. a previously decoded continuation token.
    pub fn with_exclusive_start_key(mut self, key: Option<Item>) -> Self {
        self.set_exclusive_start_key(key);
        self
    }

    /// Splits the request into one request per segment, each starting from the beginning of
    /// its segment.
    pub fn segments(&self, total_segments: u32) -> Result<Vec<ScanRequest>> {
        if let Some(segment) = &self.segment {
            return Err(Error::Config(format!(
                "Request is already restricted to segment {} of {}",
                segment.segment, segment.total_segments
            )));
        }
        if total_segments == 0 {
            return Err(Error::Config("Total segments must be at least 1".into()));
        }
        (0..total_segments)
            .map(|segment| {
                self.clone().with_exclusive_start_key(None).with_segment(segment, total_segments)
            })
            .collect()
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    pub fn segment(&self) -> Option<Segment> {
        self.segment
    }

    pub fn metric_collector(&self) -> Option<&Arc<dyn RequestMetricCollector>> {
        self.metric_collector.as_ref()
    }

    pub fn exclusive_start_key(&self) -> Option<&Item> {
        self.exclusive_start_key.as_ref()
    }

    /// Replaces the start key. An empty key is treated as absent.
    pub(crate) fn set_exclusive_start_key(&mut self, key: Option<Item>) {
        self.exclusive_start_key = key.filter(|key| !key.is_empty());
    }
}
