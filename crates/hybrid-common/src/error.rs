//! Error types for the hybrid list.

use thiserror::Error;

/// Result type alias using HybridError.
pub type Result<T> = std::result::Result<T, HybridError>;

/// Errors that can occur in hybrid list operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HybridError {
    // Configuration errors
    #[error("Invalid configuration: {name} = {value}")]
    InvalidConfiguration { name: String, value: String },

    // Positional errors
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Container is empty")]
    EmptyContainer,

    // Block errors
    #[error("Block full, capacity {capacity}")]
    CapacityExceeded { capacity: usize },

    // Internal errors
    #[error("Block chain corrupted: {0}")]
    ChainCorrupted(String),
}

impl HybridError {
    /// Builds an InvalidConfiguration error for a named parameter.
    pub fn invalid_config(name: &str, value: impl ToString) -> Self {
        Self::InvalidConfiguration {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
