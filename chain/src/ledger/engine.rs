//! Chain ownership, block admission and the ownership workflow.
//!
//! [`Blockchain`] is the single owner of a [`BlockStore`]. It wires
//! together:
//!
//! - the store itself (ordered blocks + height),
//! - a [`SignatureVerifier`] for ownership proofs,
//! - a [`ChainValidator`] for whole-chain checks, and
//! - a [`Clock`] for admission timestamps and challenge windows.
//!
//! Block admission (`add_block`) is the only mutation path. It takes
//! `&mut self`, so concurrent writers must be serialized by whoever
//! shares the chain (see [`crate::service::ChainService`]).

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ChainConfig;
use crate::ownership::{Challenge, SignatureVerifier};
use crate::types::{Block, Star, StarRecord};

use super::error::ChainError;
use super::store::BlockStore;
use super::validator::{ChainValidator, Discrepancy};

/// Single-instance star registry chain.
///
/// Generic over:
///
/// - `S`: storage backend implementing [`BlockStore`],
/// - `V`: signature primitive implementing [`SignatureVerifier`].
pub struct Blockchain<S, V> {
    pub(super) config: ChainConfig,
    pub(super) store: S,
    verifier: V,
    validator: ChainValidator,
    clock: Arc<dyn Clock>,
}

impl<S, V> Blockchain<S, V>
where
    S: BlockStore,
    V: SignatureVerifier,
{
    /// Creates a chain on the system clock and admits the genesis block
    /// if `store` is empty.
    pub fn new(config: ChainConfig, store: S, verifier: V) -> Result<Self, ChainError> {
        Self::with_clock(config, store, verifier, Arc::new(SystemClock))
    }

    /// Like [`Blockchain::new`] with an explicit clock.
    pub fn with_clock(
        config: ChainConfig,
        store: S,
        verifier: V,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ChainError> {
        let validator = ChainValidator::new(config.linkage);
        let mut chain = Self {
            config,
            store,
            verifier,
            validator,
            clock,
        };
        chain.initialize()?;
        Ok(chain)
    }

    fn initialize(&mut self) -> Result<(), ChainError> {
        if !self.store.is_empty() {
            return Ok(());
        }
        let genesis = Block::new(&self.config.genesis_data)?;
        let genesis = self.add_block(genesis)?;
        info!(
            hash = %genesis.hash.map(|h| h.to_string()).unwrap_or_default(),
            "genesis block created"
        );
        Ok(())
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Returns a reference to the underlying block store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a mutable reference to the underlying block store.
    ///
    /// This is mainly useful for tests and tooling; chain logic should
    /// normally go through [`Blockchain::submit_star`].
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Height of the tip, `None` only for an empty store.
    pub fn height(&self) -> Option<u64> {
        self.store.height()
    }

    /// Returns the tip block, if any.
    pub fn tip_block(&self) -> Option<Block> {
        self.height().and_then(|h| self.store.get_by_height(h))
    }

    /// Links, stamps, hashes and appends `block`.
    ///
    /// Only the body of `block` is kept; every other field is overwritten.
    /// If the current tip cannot be found the block is appended without a
    /// predecessor and the anomaly is logged.
    pub(crate) fn add_block(&mut self, mut block: Block) -> Result<Block, ChainError> {
        block.time = self.clock.now();
        block.previous_block_hash = None;
        block.hash = None;

        match self.store.height() {
            None => block.height = 0,
            Some(current) => {
                match self.store.get_by_height(current) {
                    Some(tip) => block.previous_block_hash = tip.hash,
                    None => warn!(
                        height = current,
                        "tip block missing during admission, appending without linkage"
                    ),
                }
                block.height = current.checked_add(1).ok_or_else(|| {
                    ChainError::Internal(format!("height overflow above {current}"))
                })?;
            }
        }

        let hash = block.compute_hash();
        block.hash = Some(hash);
        self.store.append(block.clone());

        debug!(height = block.height, hash = %hash, "block admitted");
        Ok(block)
    }

    /// Issues the challenge `address` has to sign.
    pub fn request_message_ownership_verification(&self, address: &str) -> Challenge {
        Challenge::issue(
            address,
            self.clock.now(),
            self.config.ownership.protocol_tag.as_str(),
        )
    }

    /// Verifies an ownership proof and admits a block carrying `star`.
    ///
    /// Checks run in order: message format, challenge age, signature. The
    /// chain is untouched unless all of them pass.
    pub fn submit_star(
        &mut self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block, ChainError> {
        let outcome = self.verify_submission(address, message, signature);
        if let Err(e) = &outcome {
            debug!(address, reason = e.reason(), "star submission rejected: {e}");
        }
        outcome?;

        let record = StarRecord {
            owner: address.to_string(),
            message: message.to_string(),
            signature: signature.to_string(),
            star,
        };
        let block = Block::new(&record)?;
        self.add_block(block)
    }

    fn verify_submission(
        &self,
        address: &str,
        message: &str,
        signature: &str,
    ) -> Result<(), ChainError> {
        let challenge = Challenge::parse(message)?;
        challenge.check_window(self.clock.now(), self.config.ownership.validity_window_secs)?;
        if !self.verifier.verify(message, address, signature) {
            return Err(ChainError::UnverifiedSignature(address.to_string()));
        }
        Ok(())
    }

    /// Walks the whole chain and returns every discrepancy found.
    pub fn discrepancies(&self) -> Vec<Discrepancy> {
        let blocks = self.store.blocks();
        let found = self.validator.validate(&blocks);
        if !found.is_empty() {
            warn!(count = found.len(), "chain validation found discrepancies");
        }
        found
    }

    /// Fails with [`ChainError::ChainTampered`] carrying every discrepancy.
    pub fn validate_chain(&self) -> Result<(), ChainError> {
        let found = self.discrepancies();
        if found.is_empty() {
            Ok(())
        } else {
            Err(ChainError::ChainTampered(found))
        }
    }
}
