//! Hybrid list common errors and configuration.
//!
//! This crate provides shared definitions used by the hybrid list crates.

pub mod config;
pub mod error;

pub use config::{DEFAULT_BLOCK_SIZE, ListConfig};
pub use error::{HybridError, Result};
