//! In-memory block store.
//!
//! Keeps blocks in a `Vec` in admission order. The height is the position
//! of the last block, not its `height` field. This is the only backend;
//! the chain lives for the lifetime of the process.

use crate::ledger::BlockStore;
use crate::types::{Block, BlockHash};

/// In-memory implementation of [`BlockStore`].
#[derive(Default)]
pub struct InMemoryBlockStore {
    blocks: Vec<Block>,
}

impl InMemoryBlockStore {
    /// Creates a new, empty in-memory block store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a stored block, for tamper tests.
    #[cfg(test)]
    pub(crate) fn block_mut(&mut self, height: u64) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.height == height)
    }
}

impl BlockStore for InMemoryBlockStore {
    fn height(&self) -> Option<u64> {
        self.blocks.len().checked_sub(1).map(|h| h as u64)
    }

    fn get_by_height(&self, height: u64) -> Option<Block> {
        self.blocks.iter().find(|b| b.height == height).cloned()
    }

    fn get_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        self.blocks
            .iter()
            .find(|b| b.hash.as_ref() == Some(hash))
            .cloned()
    }

    fn append(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn blocks(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admitted(height: u64, previous: Option<BlockHash>) -> Block {
        let mut block = Block::new(&format!("block {height}")).expect("encodes");
        block.height = height;
        block.time = 1_700_000_000 + height;
        block.previous_block_hash = previous;
        block.hash = Some(block.compute_hash());
        block
    }

    #[test]
    fn empty_store_has_no_height() {
        let store = InMemoryBlockStore::new();
        assert_eq!(store.height(), None);
        assert!(store.is_empty());
        assert!(store.blocks().is_empty());
    }

    #[test]
    fn append_and_lookup_roundtrip() {
        let mut store = InMemoryBlockStore::new();
        let b0 = admitted(0, None);
        let b1 = admitted(1, b0.hash);
        store.append(b0.clone());
        store.append(b1.clone());

        assert_eq!(store.height(), Some(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_by_height(1), Some(b1.clone()));
        assert_eq!(store.get_by_hash(&b0.hash.expect("hash")), Some(b0.clone()));
        assert_eq!(store.get_by_height(2), None);
        assert_eq!(store.blocks(), vec![b0, b1]);
    }

    #[test]
    fn hash_lookup_returns_first_match() {
        let mut store = InMemoryBlockStore::new();
        let b0 = admitted(0, None);
        let mut dup = b0.clone();
        dup.time += 1;
        store.append(b0.clone());
        store.append(dup);

        assert_eq!(store.get_by_hash(&b0.hash.expect("hash")), Some(b0));
    }

    #[test]
    fn hash_lookup_follows_the_stored_hash_field() {
        let mut store = InMemoryBlockStore::new();
        let b0 = admitted(0, None);
        let old = b0.hash.expect("hash");
        store.append(b0);

        store.block_mut(0).expect("present").body = "00".to_string();
        let fetched = store.get_by_hash(&old).expect("body edits keep the stored hash");
        assert!(!fetched.validate());

        let new = BlockHash(crate::types::Hash256([7u8; 32]));
        store.block_mut(0).expect("present").hash = Some(new);
        assert_eq!(store.get_by_hash(&old), None);
        assert!(store.get_by_hash(&new).is_some());
    }

    #[test]
    fn height_tracks_block_count_not_height_fields() {
        let mut store = InMemoryBlockStore::new();
        let b0 = admitted(0, None);
        store.append(b0.clone());
        store.append(admitted(1, b0.hash));

        store.block_mut(1).expect("present").height = 50;
        assert_eq!(store.height(), Some(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_by_height(1), None);
    }
}
