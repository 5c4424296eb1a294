use serde::{Deserialize, Serialize};
use log::debug;
use crate::{
    error::{Error, Result},
    store_client::RequestMetricCollector,
    table_options::ProvisionedThroughput
};
use std::sync::Arc;

/// The partition key name used unless the builder is told otherwise.
pub const DEFAULT_PARTITION_KEY_NAME: &str = "key";

/// Options for creating a table that can be enumerated by paginated scans.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTableOptions {
    provisioned_throughput: ProvisionedThroughput,
    table_name: String,
    partition_key_name: String,
    sort_key_name: Option<String>,
    #[serde(skip)]
    request_metric_collector: Option<Arc<dyn RequestMetricCollector>>,
}

impl CreateTableOptions {
    /// Creates a builder. Throughput and table name are required, the rest have defaults.
    pub fn builder(
        provisioned_throughput: ProvisionedThroughput,
        table_name: impl Into<String>,
    ) -> CreateTableOptionsBuilder {
        CreateTableOptionsBuilder {
            provisioned_throughput,
            table_name: table_name.into(),
            partition_key_name: DEFAULT_PARTITION_KEY_NAME.to_string(),
            sort_key_name: None,
            request_metric_collector: None,
        }
    }

    pub fn provisioned_throughput(&self) -> &ProvisionedThroughput {
        &self.provisioned_throughput
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn partition_key_name(&self) -> &str {
        &self.partition_key_name
    }

    pub fn sort_key_name(&self) -> Option<&str> {
        self.sort_key_name.as_deref()
    }

    pub fn request_metric_collector(&self) -> Option<&Arc<dyn RequestMetricCollector>> {
        self.request_metric_collector.as_ref()
    }
}

/// Builder for CreateTableOptions.
#[derive(Clone, Debug)]
pub struct CreateTableOptionsBuilder {
    provisioned_throughput: ProvisionedThroughput,
    table_name: String,
    partition_key_name: String,
    sort_key_name: Option<String>,
    request_metric_collector: Option<Arc<dyn RequestMetricCollector>>,
}

impl CreateTableOptionsBuilder {
    /// Sets the partition key name. Defaults to "key".
    pub fn partition_key_name(mut self, name: impl Into<String>) -> Self {
        self.partition_key_name = name.into();
        self
    }

    /// Sets the sort key name. Without one, the table only has a partition key.
    pub fn sort_key_name(mut self, name: impl Into<String>) -> Self {
        self.sort_key_name = Some(name.into());
        self
    }

    /// Sets a collector for the table creation request.
    pub fn request_metric_collector(mut self, collector: Arc<dyn RequestMetricCollector>) -> Self {
        self.request_metric_collector = Some(collector);
        self
    }

    /// Validates and builds the options.
    pub fn build(self) -> Result<CreateTableOptions> {
        self.provisioned_throughput.validate()?;
        if self.table_name.is_empty() {
            return Err(Error::Config("Table name must not be empty".into()));
        }
        if self.partition_key_name.is_empty() {
            return Err(Error::Config("Partition key name must not be empty".into()));
        }
        match &self.sort_key_name {
            Some(sort) if sort.is_empty() => {
                return Err(Error::Config("Sort key name must not be empty".into()))
            }
            Some(sort) if *sort == self.partition_key_name => {
                return Err(Error::Config(format!(
                    "Sort key name {} must differ from the partition key name",
                    sort
                )))
            }
            _ => {}
        }
        debug!("Built table options for {}", self.table_name);
        Ok(CreateTableOptions {
            provisioned_throughput: self.provisioned_throughput,
            table_name: self.table_name,
            partition_key_name: self.partition_key_name,
            sort_key_name: self.sort_key_name,
            request_metric_collector: self.request_metric_collector,
        })
    }
}
