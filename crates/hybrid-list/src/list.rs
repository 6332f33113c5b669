//! Hybrid list: a singly-linked chain of fixed-capacity blocks.
//!
//! Positional operations walk the chain from the head, accumulating block
//! lengths until the block owning the requested global index is found, then
//! delegate to that block. Appends only touch the tail.
//!
//! ```text
//! head                                   tail
//!  |                                      |
//!  v                                      v
//! [1 2 3 _] -> [4 5 _ _] -> [6 7 8 9] -> [10 _ _ _]
//!  0..3         3..5         5..9         9..10      global index ranges
//! ```
//!
//! A full block is split before it receives a new value; a block emptied by a
//! removal is unlinked and released immediately, so no linked block is ever
//! empty.

use crate::arena::BlockArena;
use crate::block::{Block, BlockId};
use hybrid_common::{HybridError, ListConfig, Result};
use tracing::{debug, error, trace};

/// Position of a global index inside the chain.
#[derive(Debug, Clone, Copy)]
struct Location {
    /// Block preceding `block`, None if `block` is the head.
    prev: Option<BlockId>,
    /// Block owning the index.
    block: BlockId,
    /// Local offset within `block`.
    offset: usize,
}

/// Sequence of `f64` stored as a chain of blocks holding up to `block_size`
/// values each.
///
/// Indexed access costs one hop per block before the owner; inserts and
/// removals shift at most `block_size` values.
pub struct HybridList {
    /// Capacity of every block, fixed at construction.
    block_size: usize,
    /// Storage for every linked block.
    arena: BlockArena,
    /// First block of the chain.
    head: Option<BlockId>,
    /// Last block of the chain.
    tail: Option<BlockId>,
    /// Total values across all blocks.
    len: usize,
    /// Number of linked blocks.
    block_count: usize,
}

impl HybridList {
    /// Creates an empty list whose blocks hold `block_size` values.
    ///
    /// Fails with InvalidConfiguration if `block_size` is 0.
    pub fn new(block_size: usize) -> Result<Self> {
        Self::with_config(&ListConfig::new(block_size))
    }

    /// Creates an empty list from a validated config.
    pub fn with_config(config: &ListConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config.block_size))
    }

    fn empty(block_size: usize) -> Self {
        Self {
            block_size,
            arena: BlockArena::new(),
            head: None,
            tail: None,
            len: 0,
            block_count: 0,
        }
    }

    /// Returns the number of values stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of value slots across all linked blocks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block_count * self.block_size
    }

    /// Returns the configured block capacity.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the number of linked blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Returns the head block.
    pub fn front(&self) -> Option<&Block> {
        self.head.map(|id| &self.arena[id])
    }

    /// Returns the tail block.
    pub fn back(&self) -> Option<&Block> {
        self.tail.map(|id| &self.arena[id])
    }

    /// Finds the block owning global `index`.
    ///
    /// This is the only chain walk used for positional access, so reads,
    /// inserts and removals agree on which block owns an index.
    fn locate(&self, index: usize) -> Result<Location> {
        if index >= self.len {
            return Err(HybridError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let mut prev = None;
        let mut cursor = self.head;
        let mut searched = 0;

        while let Some(id) = cursor {
            let block = &self.arena[id];
            if index < searched + block.len() {
                return Ok(Location {
                    prev,
                    block: id,
                    offset: index - searched,
                });
            }
            searched += block.len();
            prev = cursor;
            cursor = block.next();
        }

        invariant_violated(format_args!(
            "chain exhausted after {searched} values looking for index {index} of {}",
            self.len
        ))
    }

    /// Returns the value at global `index`.
    pub fn at(&self, index: usize) -> Result<f64> {
        let loc = self.locate(index)?;
        match self.arena[loc.block].get(loc.offset) {
            Some(value) => Ok(value),
            None => invariant_violated(format_args!("{} has no offset {}", loc.block, loc.offset)),
        }
    }

    /// Returns a mutable reference to the value at global `index`.
    ///
    /// The borrow ends before any structural change to the list.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut f64> {
        let loc = self.locate(index)?;
        match self.arena[loc.block].get_mut(loc.offset) {
            Some(slot) => Ok(slot),
            None => invariant_violated(format_args!("{} has no offset {}", loc.block, loc.offset)),
        }
    }

    /// Overwrites the value at global `index`.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        *self.at_mut(index)? = value;
        Ok(())
    }

    /// Appends a value to the end of the list.
    ///
    /// A full tail is split first: it keeps `block_size / 2 + 1` values and the
    /// rest move, in order, to a new tail that then receives `value`.
    pub fn push_back(&mut self, value: f64) {
        let tail = self.tail;
        match tail {
            None => {
                let mut block = Block::new(self.block_size);
                checked(block.push_back(value));
                let id = self.arena.allocate(block);
                self.head = Some(id);
                self.tail = Some(id);
                self.block_count = 1;
                debug!(block = %id, block_size = self.block_size, "allocated head block");
            }
            Some(tail) if self.arena[tail].is_full() => {
                let keep = self.block_size / 2 + 1;
                let mut new_tail = checked(self.arena[tail].split_off(keep));
                checked(new_tail.push_back(value));
                let moved = new_tail.len() - 1;

                let id = self.arena.allocate(new_tail);
                self.arena[tail].set_next(Some(id));
                self.tail = Some(id);
                self.block_count += 1;
                debug!(
                    old_tail = %tail,
                    new_tail = %id,
                    kept = keep,
                    moved,
                    blocks = self.block_count,
                    "split full tail on append"
                );
            }
            Some(tail) => {
                checked(self.arena[tail].push_back(value));
                trace!(block = %tail, "appended to tail");
            }
        }
        self.len += 1;
    }

    /// Removes and returns the last value.
    ///
    /// Fails with EmptyContainer if the list is empty.
    pub fn pop_back(&mut self) -> Result<f64> {
        if self.len == 0 {
            return Err(HybridError::EmptyContainer);
        }
        self.erase(self.len - 1)
    }

    /// Inserts `value` so that it ends up at global `index`, shifting every
    /// value previously at `index..` up by one.
    ///
    /// `index` must be an existing position (`index < len`); use `push_back`
    /// to append. If the owning block is full it is split and the value goes
    /// into whichever half now holds the target position.
    pub fn insert(&mut self, index: usize, value: f64) -> Result<()> {
        let loc = self.locate(index)?;

        if self.arena[loc.block].is_full() {
            // Retained half must keep a free slot, which matters for blocks of 1 and 2
            let keep = (self.block_size / 2 + 1).min(self.block_size - 1);
            let right = checked(self.arena[loc.block].split_off(keep));
            let right_id = self.arena.allocate(right);
            self.arena[loc.block].set_next(Some(right_id));
            if self.tail == Some(loc.block) {
                self.tail = Some(right_id);
            }
            self.block_count += 1;

            if loc.offset <= keep {
                checked(self.arena[loc.block].insert(loc.offset, value));
            } else {
                checked(self.arena[right_id].insert(loc.offset - keep, value));
            }
            debug!(
                block = %loc.block,
                new_block = %right_id,
                kept = keep,
                offset = loc.offset,
                blocks = self.block_count,
                "split full block on insert"
            );
        } else {
            checked(self.arena[loc.block].insert(loc.offset, value));
        }

        self.len += 1;
        Ok(())
    }

    /// Removes and returns the value at global `index`.
    ///
    /// The owning block is released as soon as it becomes empty.
    pub fn erase(&mut self, index: usize) -> Result<f64> {
        let loc = self.locate(index)?;
        let value = checked(self.arena[loc.block].remove(loc.offset));
        self.len -= 1;

        if self.arena[loc.block].is_empty() {
            self.retire(loc.prev, loc.block);
        }
        Ok(value)
    }

    /// Unlinks and releases an empty block, repairing head and tail.
    fn retire(&mut self, prev: Option<BlockId>, id: BlockId) {
        let next = self.arena[id].next();
        match prev {
            None => self.head = next,
            Some(prev_id) => self.arena[prev_id].set_next(next),
        }
        if self.tail == Some(id) {
            self.tail = prev;
        }

        self.arena.release(id);
        self.block_count -= 1;
        debug!(block = %id, blocks = self.block_count, "retired empty block");
    }

    /// Releases every block and resets the list to empty.
    pub fn clear(&mut self) {
        let released = self.block_count;
        let mut cursor = self.head.take();
        while let Some(id) = cursor {
            cursor = self.arena.release(id).and_then(|block| block.next());
        }
        self.arena.reset();
        self.tail = None;
        self.len = 0;
        self.block_count = 0;

        if released > 0 {
            debug!(blocks = released, "cleared hybrid list");
        }
    }

    /// Walks the chain and reports the first broken structural invariant.
    pub fn check_invariants(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(HybridError::ChainCorrupted("block size is zero".to_string()));
        }

        let mut values = 0;
        let mut blocks = 0;
        let mut last = None;
        let mut cursor = self.head;

        while let Some(id) = cursor {
            if blocks == self.arena.live() {
                return Err(HybridError::ChainCorrupted(format!(
                    "cycle after {blocks} blocks at {id}"
                )));
            }
            let block = self
                .arena
                .get(id)
                .ok_or_else(|| HybridError::ChainCorrupted(format!("{id} is not allocated")))?;
            if block.capacity() != self.block_size {
                return Err(HybridError::ChainCorrupted(format!(
                    "{id} has capacity {}, expected {}",
                    block.capacity(),
                    self.block_size
                )));
            }
            if block.is_empty() {
                return Err(HybridError::ChainCorrupted(format!("{id} is linked but empty")));
            }

            values += block.len();
            blocks += 1;
            last = Some(id);
            cursor = block.next();
        }

        if values != self.len {
            return Err(HybridError::ChainCorrupted(format!(
                "length {} but chain holds {values} values",
                self.len
            )));
        }
        if blocks != self.block_count {
            return Err(HybridError::ChainCorrupted(format!(
                "block count {} but {blocks} blocks linked",
                self.block_count
            )));
        }
        if blocks != self.arena.live() {
            return Err(HybridError::ChainCorrupted(format!(
                "{} blocks allocated but {blocks} linked",
                self.arena.live()
            )));
        }
        if last != self.tail {
            return Err(HybridError::ChainCorrupted(format!(
                "tail {:?} is not the last linked block {:?}",
                self.tail, last
            )));
        }
        Ok(())
    }

    /// Blocks from head to tail.
    fn chain(&self) -> Chain<'_> {
        Chain {
            arena: &self.arena,
            cursor: self.head,
        }
    }

    /// Appends every value of `source` in order.
    fn extend_from(&mut self, source: &HybridList) {
        for block in source.chain() {
            for &value in block.as_slice() {
                self.push_back(value);
            }
        }
    }
}

impl Default for HybridList {
    fn default() -> Self {
        Self::empty(ListConfig::default().block_size)
    }
}

impl Clone for HybridList {
    /// Deep copy rebuilt by appending, so the copy's blocks are packed
    /// independently of the source's layout.
    fn clone(&self) -> Self {
        let mut copy = Self::empty(self.block_size);
        copy.extend_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.block_size = source.block_size;
        self.extend_from(source);
    }
}

impl Drop for HybridList {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Lists are equal when they hold the same values in the same order,
/// regardless of block size or layout.
impl PartialEq for HybridList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .chain()
                .flat_map(Block::as_slice)
                .eq(other.chain().flat_map(Block::as_slice))
    }
}

impl std::fmt::Debug for HybridList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridList")
            .field("block_size", &self.block_size)
            .field("len", &self.len)
            .field("block_count", &self.block_count)
            .field(
                "blocks",
                &self.chain().map(Block::as_slice).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Walks linked blocks from the head.
struct Chain<'a> {
    arena: &'a BlockArena,
    cursor: Option<BlockId>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        let id = self.cursor?;
        let block = &self.arena[id];
        self.cursor = block.next();
        Some(block)
    }
}

/// Unwraps a block operation whose precondition the list already checked.
#[inline]
fn checked<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => invariant_violated(format_args!("{err}")),
    }
}

/// Logs and aborts. The chain no longer matches its counters, so no
/// operation on it can be trusted.
#[cold]
fn invariant_violated(reason: std::fmt::Arguments<'_>) -> ! {
    error!(%reason, "hybrid list invariant violated");
    std::process::abort()
}
