//! Configuration structures for the hybrid list.

use crate::error::{HybridError, Result};
use serde::{Deserialize, Serialize};

/// Default number of elements per block.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Construction-time configuration for a hybrid list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Capacity of every block the list allocates. Must be non-zero.
    pub block_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl ListConfig {
    /// Creates a config with the given block size.
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Checks that every option is in range.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(HybridError::invalid_config("block_size", self.block_size));
        }
        Ok(())
    }
}
