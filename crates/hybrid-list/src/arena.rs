//! Slot arena that owns every block of a hybrid list.

use crate::block::{Block, BlockId};
use std::ops::{Index, IndexMut};

/// Vec-backed block storage with slot reuse.
///
/// Block ids map directly to Vec indices. Released slots go on a free list and
/// are handed out again before the Vec grows.
#[derive(Debug, Clone, Default)]
pub(crate) struct BlockArena {
    /// Block slots by id (index = id).
    slots: Vec<Option<Block>>,
    /// Released slot ids available for reuse.
    free: Vec<BlockId>,
}

impl BlockArena {
    /// Creates an empty arena.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a block and returns its id.
    #[inline]
    pub(crate) fn allocate(&mut self, block: Block) -> BlockId {
        if let Some(id) = self.free.pop() {
            self.slots[id.0 as usize] = Some(block);
            return id;
        }
        let id = BlockId(self.slots.len() as u32);
        self.slots.push(Some(block));
        id
    }

    /// Removes a block from the arena, returning it.
    pub(crate) fn release(&mut self, id: BlockId) -> Option<Block> {
        let block = self.slots.get_mut(id.0 as usize)?.take()?;
        self.free.push(id);
        Some(block)
    }

    /// Gets a block by id.
    #[inline]
    pub(crate) fn get(&self, id: BlockId) -> Option<&Block> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    /// Returns the number of live blocks.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Drops every slot, live or free.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl Index<BlockId> for BlockArena {
    type Output = Block;

    #[inline]
    fn index(&self, id: BlockId) -> &Block {
        match self.slots.get(id.0 as usize) {
            Some(Some(block)) => block,
            _ => panic!("dangling {id} in block arena"),
        }
    }
}

impl IndexMut<BlockId> for BlockArena {
    #[inline]
    fn index_mut(&mut self, id: BlockId) -> &mut Block {
        match self.slots.get_mut(id.0 as usize) {
            Some(Some(block)) => block,
            _ => panic!("dangling {id} in block arena"),
        }
    }
}
