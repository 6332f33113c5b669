//! Fixed-capacity blocks that make up a hybrid list chain.
//!
//! A block owns a boxed slot buffer sized once at creation. Occupied slots are
//! always the prefix `[0, len)`; inserts and removals shift the tail of that
//! prefix in place.
//!
//! ```text
//! +-----+-----+-----+-----+-----+-----+
//! | v0  | v1  | v2  | v3  |     |     |   capacity = 6, len = 4
//! +-----+-----+-----+-----+-----+-----+
//!                           ^ next free slot          next -> block:N
//! ```

use hybrid_common::{HybridError, Result};

/// Unique identifier for a block slot in the list's block arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub u32);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "block:{}", self.0)
    }
}

/// Ordered run of up to `capacity` values plus a link to the next block.
#[derive(Debug, Clone)]
pub struct Block {
    /// Slot buffer, `capacity` entries long.
    data: Box<[f64]>,
    /// Number of occupied slots.
    len: usize,
    /// Successor in the chain.
    next: Option<BlockId>,
}

impl Block {
    /// Creates an empty block with room for `capacity` values.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "block capacity must be non-zero");
        Self {
            data: vec![0.0; capacity].into_boxed_slice(),
            len: 0,
            next: None,
        }
    }

    /// Returns the maximum number of values this block can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    /// Returns the occupied slots in order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data[..self.len]
    }

    /// Returns the value at local offset `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.as_slice().get(index).copied()
    }

    /// Returns a mutable reference to the value at local offset `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut f64> {
        self.data[..self.len].get_mut(index)
    }

    /// Overwrites the value at local offset `index`.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.len;
        let slot = self
            .get_mut(index)
            .ok_or(HybridError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Appends a value. Returns CapacityExceeded if the block is full.
    #[inline]
    pub fn push_back(&mut self, value: f64) -> Result<()> {
        if self.is_full() {
            return Err(HybridError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        self.data[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Inserts a value at local offset `index`, shifting `[index, len)` right by one.
    ///
    /// `index == len` appends. Fails with CapacityExceeded if full and
    /// IndexOutOfRange if `index > len`.
    pub fn insert(&mut self, index: usize, value: f64) -> Result<()> {
        if index > self.len {
            return Err(HybridError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if self.is_full() {
            return Err(HybridError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        self.data.copy_within(index..self.len, index + 1);
        self.data[index] = value;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the value at local offset `index`, shifting
    /// `(index, len)` left by one.
    pub fn remove(&mut self, index: usize) -> Result<f64> {
        if index >= self.len {
            return Err(HybridError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let value = self.data[index];
        self.data.copy_within(index + 1..self.len, index);
        self.len -= 1;
        Ok(value)
    }

    /// Sets the number of occupied slots to `new_len`.
    ///
    /// Shrinking drops the trailing values. Growing exposes zero-filled slots.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        if new_len > self.capacity() {
            return Err(HybridError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        if new_len > self.len {
            self.data[self.len..new_len].fill(0.0);
        }
        self.len = new_len;
        Ok(())
    }

    /// Moves local offsets `[at, len)` into a new block of the same capacity.
    ///
    /// The new block takes over this block's successor link; this block keeps
    /// `[0, at)` and is left unlinked until the caller points it at the new one.
    pub fn split_off(&mut self, at: usize) -> Result<Block> {
        if at > self.len {
            return Err(HybridError::IndexOutOfRange {
                index: at,
                len: self.len,
            });
        }

        let mut right = Block::new(self.capacity());
        let moved = self.len - at;
        right.data[..moved].copy_from_slice(&self.data[at..self.len]);
        right.len = moved;
        right.next = self.next.take();
        self.len = at;
        Ok(right)
    }

    /// Returns the successor block, if any.
    #[inline]
    pub fn next(&self) -> Option<BlockId> {
        self.next
    }

    /// Sets the successor block.
    #[inline]
    pub fn set_next(&mut self, next: Option<BlockId>) {
        self.next = next;
    }
}
