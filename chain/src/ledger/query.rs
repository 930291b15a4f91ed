//! Read-only lookups over the chain.

use tracing::debug;

use crate::ownership::SignatureVerifier;
use crate::types::{Block, BlockHash, StarOwnership, StarRecord};

use super::engine::Blockchain;
use super::error::ChainError;
use super::store::BlockStore;

impl<S, V> Blockchain<S, V>
where
    S: BlockStore,
    V: SignatureVerifier,
{
    /// Block with the given hash, or `None` when no block matches.
    pub fn get_block_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        self.store.get_by_hash(hash)
    }

    /// Block at `height`, or [`ChainError::BlockNotFound`].
    pub fn get_block_by_height(&self, height: u64) -> Result<Block, ChainError> {
        self.store
            .get_by_height(height)
            .ok_or(ChainError::BlockNotFound(height))
    }

    /// Every star registered by `address`.
    ///
    /// Blocks whose body does not decode as a star record (genesis, or
    /// corrupted bodies) are skipped. The result has set semantics; it is
    /// returned in chain order.
    pub fn get_stars_by_wallet_address(&self, address: &str) -> Vec<StarOwnership> {
        self.store
            .blocks()
            .iter()
            .filter_map(|block| match block.decode_body::<StarRecord>() {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(height = block.height, "skipping undecodable block body: {e}");
                    None
                }
            })
            .filter(|record| record.owner == address)
            .map(StarOwnership::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use ed25519_dalek::SigningKey;

    use crate::clock::ManualClock;
    use crate::config::ChainConfig;
    use crate::ledger::{Blockchain, ChainError};
    use crate::ownership::{Ed25519Verifier, address_of, sign_message};
    use crate::storage::InMemoryBlockStore;
    use crate::types::{BlockHash, HASH_LEN, Hash256, Star, StarOwnership};

    type TestChain = Blockchain<InMemoryBlockStore, Ed25519Verifier>;

    fn test_chain() -> TestChain {
        Blockchain::with_clock(
            ChainConfig::default(),
            InMemoryBlockStore::new(),
            Ed25519Verifier,
            Arc::new(ManualClock::new(1_700_000_000)),
        )
        .expect("chain initializes")
    }

    fn star(story: &str) -> Star {
        Star {
            ra: "ra".to_string(),
            dec: "dec".to_string(),
            mag: Some("4.2".to_string()),
            cen: None,
            story: story.to_string(),
        }
    }

    fn register(chain: &mut TestChain, seed: u8, story: &str) -> String {
        let sk = SigningKey::from_bytes(&[seed; 32]);
        let address = address_of(&sk.verifying_key());
        let message = chain
            .request_message_ownership_verification(&address)
            .message();
        let signature = sign_message(&sk, &message);
        chain
            .submit_star(&address, &message, &signature, star(story))
            .expect("submission accepted");
        address
    }

    #[test]
    fn lookup_by_hash_finds_admitted_blocks() {
        let mut chain = test_chain();
        register(&mut chain, 1, "a");
        let block = chain.get_block_by_height(1).expect("present");
        let hash = block.hash.expect("admitted blocks carry a hash");

        assert_eq!(chain.get_block_by_hash(&hash), Some(block));
    }

    #[test]
    fn lookup_by_unknown_hash_is_none() {
        let chain = test_chain();
        let unknown = BlockHash(Hash256([0xAB; HASH_LEN]));
        assert_eq!(chain.get_block_by_hash(&unknown), None);
    }

    #[test]
    fn lookup_by_missing_height_fails() {
        let chain = test_chain();
        assert!(chain.get_block_by_height(0).is_ok());
        assert!(matches!(
            chain.get_block_by_height(1),
            Err(ChainError::BlockNotFound(1))
        ));
    }

    #[test]
    fn stars_by_address_returns_exactly_the_owner_set() {
        let mut chain = test_chain();
        let alice = register(&mut chain, 1, "alice one");
        let bob = register(&mut chain, 2, "bob one");
        register(&mut chain, 1, "alice two");

        let got: HashSet<StarOwnership> = chain
            .get_stars_by_wallet_address(&alice)
            .into_iter()
            .collect();
        let want: HashSet<StarOwnership> = ["alice one", "alice two"]
            .into_iter()
            .map(|story| StarOwnership {
                owner: alice.clone(),
                star: star(story),
            })
            .collect();
        assert_eq!(got, want);

        assert_eq!(chain.get_stars_by_wallet_address(&bob).len(), 1);
        assert!(chain.get_stars_by_wallet_address("nobody").is_empty());
    }

    #[test]
    fn undecodable_bodies_are_skipped() {
        let mut chain = test_chain();
        let alice = register(&mut chain, 1, "kept");
        register(&mut chain, 1, "corrupted");

        chain.store_mut().block_mut(2).expect("present").body = "zz-not-hex".to_string();

        let stars = chain.get_stars_by_wallet_address(&alice);
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].star.story, "kept");
    }
}
