//! Configuration for the batch coordinator

use serde::{Deserialize, Serialize};

use crate::constants::sync;

/// Configuration for a synchronization run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Items resolved concurrently per batch; batches run strictly one after another
    pub batch_size: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            batch_size: sync::DEFAULT_BATCH_SIZE,
        }
    }
}

impl CoordinatorConfig {
    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Number of batches needed for `total` items
    pub fn batch_count(&self, total: usize) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        total.div_ceil(self.batch_size)
    }
}
