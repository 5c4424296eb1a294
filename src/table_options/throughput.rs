use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// Read and write capacity units provisioned for a table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedThroughput {
    pub read_capacity_units: u64,
    pub write_capacity_units: u64,
}

impl ProvisionedThroughput {
    pub fn new(read_capacity_units: u64, write_capacity_units: u64) -> Self {
        Self { read_capacity_units, write_capacity_units }
    }

    /// Checks that both capacities are at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.read_capacity_units == 0 || self.write_capacity_units == 0 {
            return Err(Error::Config(format!(
                "Provisioned throughput must be at least 1, got {} read and {} write",
                self.read_capacity_units, self.write_capacity_units
            )));
        }
        Ok(())
    }
}
