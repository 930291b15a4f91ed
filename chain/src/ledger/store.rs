//! Storage abstraction used by the chain.

use crate::types::{Block, BlockHash};

/// Ordered, append-only block storage.
///
/// Implementations own their blocks; callers only ever receive clones.
/// The interface is intentionally small: admission needs the current
/// height, the tip and `append`; queries and validation need lookups and
/// an ordered snapshot.
pub trait BlockStore {
    /// Number of stored blocks minus one, `None` while empty.
    ///
    /// Independent of the blocks' own `height` fields.
    fn height(&self) -> Option<u64>;

    /// Fetches the first block whose `height` matches.
    fn get_by_height(&self, height: u64) -> Option<Block>;

    /// Fetches the first block whose `hash` matches.
    fn get_by_hash(&self, hash: &BlockHash) -> Option<Block>;

    /// Appends a fully admitted block and advances the height.
    fn append(&mut self, block: Block);

    /// All blocks in insertion order.
    fn blocks(&self) -> Vec<Block>;

    /// Number of stored blocks.
    fn len(&self) -> usize {
        self.height().map_or(0, |h| h as usize + 1)
    }

    /// Returns `true` if no blocks are stored.
    fn is_empty(&self) -> bool {
        self.height().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal vector-backed store; good for checking trait-object use and
    /// the provided `len`/`is_empty` helpers.
    #[derive(Default)]
    struct DummyStore {
        blocks: Vec<Block>,
    }

    impl BlockStore for DummyStore {
        fn height(&self) -> Option<u64> {
            self.blocks.len().checked_sub(1).map(|h| h as u64)
        }

        fn get_by_height(&self, height: u64) -> Option<Block> {
            self.blocks.iter().find(|b| b.height == height).cloned()
        }

        fn get_by_hash(&self, hash: &BlockHash) -> Option<Block> {
            self.blocks.iter().find(|b| b.hash == Some(*hash)).cloned()
        }

        fn append(&mut self, block: Block) {
            self.blocks.push(block);
        }

        fn blocks(&self) -> Vec<Block> {
            self.blocks.clone()
        }
    }

    #[test]
    fn block_store_trait_is_object_safe() {
        fn use_trait_object(store: &mut dyn BlockStore) {
            let _ = store.height();
        }

        let mut store = DummyStore::default();
        use_trait_object(&mut store);
    }

    #[test]
    fn len_follows_height() {
        let mut store = DummyStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);

        let mut block = Block::new("genesis").expect("encodes");
        block.hash = Some(block.compute_hash());
        store.append(block.clone());
        block.height = 1;
        store.append(block);

        assert!(!store.is_empty());
        assert_eq!(store.len(), 2);
    }
}
