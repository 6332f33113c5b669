//! Hybrid list: linked blocks with array-style access inside each block.
//!
//! This crate provides:
//! - Fixed-capacity blocks with in-place insert, remove and split
//! - A block arena that owns every block of a chain
//! - `HybridList`, the chain container with indexed access, append,
//!   positional insert and positional removal

mod arena;
mod block;
mod list;

pub use block::{Block, BlockId};
pub use hybrid_common::{DEFAULT_BLOCK_SIZE, HybridError, ListConfig, Result};
pub use list::HybridList;
