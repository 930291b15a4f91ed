//! Shared, concurrency-safe handle to a [`Blockchain`].
//!
//! Block admission reads the tip and then appends on top of it, so two
//! admissions must never interleave. [`ChainService`] enforces this with a
//! `tokio::sync::RwLock`: submissions hold the write lock for the whole
//! verify-then-admit sequence, while queries, challenge issuance and
//! validation share the read lock.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use crate::ledger::{BlockStore, Blockchain, ChainError, Discrepancy};
use crate::metrics::ChainMetrics;
use crate::ownership::{Challenge, SignatureVerifier};
use crate::types::{Block, BlockHash, Star, StarOwnership};

/// Cloneable async handle to a single chain instance.
pub struct ChainService<S, V> {
    chain: Arc<RwLock<Blockchain<S, V>>>,
    metrics: Option<ChainMetrics>,
}

impl<S, V> Clone for ChainService<S, V> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
            metrics: self.metrics.clone(),
        }
    }
}

impl<S, V> ChainService<S, V>
where
    S: BlockStore + Send + Sync,
    V: SignatureVerifier,
{
    pub fn new(chain: Blockchain<S, V>) -> Self {
        Self {
            chain: Arc::new(RwLock::new(chain)),
            metrics: None,
        }
    }

    /// Records admissions, rejections and validation passes into `metrics`.
    pub fn with_metrics(mut self, metrics: ChainMetrics) -> Self {
        if let Ok(chain) = self.chain.try_read() {
            metrics.chain_height.set(height_gauge(chain.height()));
        }
        self.metrics = Some(metrics);
        self
    }

    pub async fn height(&self) -> Option<u64> {
        self.chain.read().await.height()
    }

    pub async fn request_validation(&self, address: &str) -> Challenge {
        self.chain
            .read()
            .await
            .request_message_ownership_verification(address)
    }

    pub async fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block, ChainError> {
        let mut chain = self.chain.write().await;
        let result = chain.submit_star(address, message, signature, star);

        if let Some(m) = &self.metrics {
            match &result {
                Ok(block) => {
                    m.blocks_admitted.inc();
                    m.chain_height.set(height_gauge(Some(block.height)));
                }
                Err(e) => m
                    .submissions_rejected
                    .with_label_values(&[e.reason()])
                    .inc(),
            }
        }
        result
    }

    pub async fn block_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        self.chain.read().await.get_block_by_hash(hash)
    }

    pub async fn block_by_height(&self, height: u64) -> Result<Block, ChainError> {
        self.chain.read().await.get_block_by_height(height)
    }

    pub async fn stars_by_owner(&self, address: &str) -> Vec<StarOwnership> {
        self.chain.read().await.get_stars_by_wallet_address(address)
    }

    pub async fn validate_chain(&self) -> Vec<Discrepancy> {
        let start = Instant::now();
        let found = self.chain.read().await.discrepancies();

        if let Some(m) = &self.metrics {
            m.validation_seconds.observe(start.elapsed().as_secs_f64());
            m.discrepancies_found.inc_by(found.len() as u64);
        }
        found
    }
}

fn height_gauge(height: Option<u64>) -> i64 {
    height.map_or(-1, |h| i64::try_from(h).unwrap_or(i64::MAX))
}
