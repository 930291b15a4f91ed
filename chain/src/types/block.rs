// chain/src/types/block.rs

//! Block types and hashing.
//!
//! A [`Block`] is one record of the chain: an opaque encoded body, the
//! admission timestamp, its height and the hash of its predecessor. The
//! block hash is fixed at admission and is the identity used for lookup
//! and linkage.
//!
//! Hashing is done over the **bincode 2** encoding (`serde` integration,
//! explicit `standard()` config) of every field except `hash` itself. The
//! body is the hex encoding of the payload's JSON serialization.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Hash256, HashParseError};

/// Strongly-typed block hash.
///
/// This is the content hash of a [`Block`], computed as a BLAKE3-256
/// digest over the canonical bincode-2 serialization of the block's
/// hashed fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub Hash256);

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlockHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(BlockHash)
    }
}

/// Errors raised while encoding or decoding a block body.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to encode block body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("block body is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("failed to decode block body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A single record of the chain.
///
/// Blocks are created by [`Block::new`] with only the body populated;
/// `height`, `time`, `previous_block_hash` and `hash` are filled in by
/// block admission and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, starting from 0 at genesis.
    pub height: u64,

    /// Admission time in seconds since Unix epoch.
    pub time: u64,

    /// Hex-encoded JSON payload. Opaque to the chain itself.
    pub body: String,

    /// Hash of the block at `height - 1`; `None` for genesis.
    pub previous_block_hash: Option<BlockHash>,

    /// Hash over all other fields, set at admission.
    pub hash: Option<BlockHash>,
}

/// Borrowed view of the hashed fields, in canonical order.
#[derive(Serialize)]
struct HashedFields<'a> {
    height: u64,
    time: u64,
    body: &'a str,
    previous_block_hash: Option<BlockHash>,
}

impl Block {
    /// Creates an unadmitted block whose body encodes `data`.
    pub fn new<T: Serialize + ?Sized>(data: &T) -> Result<Self, PayloadError> {
        let json = serde_json::to_vec(data).map_err(PayloadError::Encode)?;
        Ok(Self {
            height: 0,
            time: 0,
            body: hex::encode(json),
            previous_block_hash: None,
            hash: None,
        })
    }

    /// Returns the canonical byte representation of the hashed fields.
    ///
    /// # Panics
    ///
    /// Panics if encoding fails. This is considered a programming
    /// error, because all fields are plain integers, strings and hashes.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let fields = HashedFields {
            height: self.height,
            time: self.time,
            body: &self.body,
            previous_block_hash: self.previous_block_hash,
        };
        // Explicit config to avoid relying on any implicit defaults.
        let cfg = bincode::config::standard();
        bincode::serde::encode_to_vec(&fields, cfg)
            .expect("block fields should always be serializable with bincode 2 + serde")
    }

    /// Computes the BLAKE3-256 hash of this block, ignoring `hash`.
    pub fn compute_hash(&self) -> BlockHash {
        BlockHash(Hash256::compute(&self.canonical_bytes()))
    }

    /// Recomputes the hash and compares it with the stored one.
    ///
    /// Returns `false` for blocks that were never admitted.
    pub fn validate(&self) -> bool {
        self.hash == Some(self.compute_hash())
    }

    /// Decodes the body back into a payload value.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, PayloadError> {
        let json = hex::decode(&self.body)?;
        serde_json::from_slice(&json).map_err(PayloadError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HASH_LEN;

    fn admitted_block(body: &str) -> Block {
        let mut block = Block::new(body).expect("string body encodes");
        block.height = 1;
        block.time = 1_700_000_000;
        block.previous_block_hash = Some(BlockHash(Hash256([1u8; HASH_LEN])));
        block.hash = Some(block.compute_hash());
        block
    }

    #[test]
    fn block_hash_is_deterministic() {
        let block = admitted_block("payload");
        assert_eq!(block.compute_hash(), block.compute_hash());
    }

    #[test]
    fn hash_excludes_the_hash_field() {
        let mut block = admitted_block("payload");
        let before = block.compute_hash();
        block.hash = Some(BlockHash(Hash256([9u8; HASH_LEN])));
        assert_eq!(block.compute_hash(), before);
    }

    #[test]
    fn unmodified_block_validates() {
        assert!(admitted_block("payload").validate());
    }

    #[test]
    fn mutating_any_hashed_field_breaks_validation() {
        let original = admitted_block("payload");

        let mut b = original.clone();
        b.height += 1;
        assert!(!b.validate());

        let mut b = original.clone();
        b.time += 1;
        assert!(!b.validate());

        let mut b = original.clone();
        b.body = hex::encode(b"\"other\"");
        assert!(!b.validate());

        let mut b = original;
        b.previous_block_hash = None;
        assert!(!b.validate());
    }

    #[test]
    fn unadmitted_block_does_not_validate() {
        let block = Block::new("payload").expect("encodes");
        assert!(block.hash.is_none());
        assert!(!block.validate());
    }

    #[test]
    fn body_decodes_to_the_original_value() {
        let block = Block::new(&vec![1u32, 2, 3]).expect("encodes");
        let decoded: Vec<u32> = block.decode_body().expect("decodes");
        assert_eq!(decoded, vec![1, 2, 3]);
    }

    #[test]
    fn decode_body_reports_bad_hex_and_bad_json() {
        let mut block = Block::new("payload").expect("encodes");

        block.body = "not-hex".to_string();
        assert!(matches!(
            block.decode_body::<String>(),
            Err(PayloadError::Hex(_))
        ));

        block.body = hex::encode(b"{not json");
        assert!(matches!(
            block.decode_body::<String>(),
            Err(PayloadError::Decode(_))
        ));
    }

    #[test]
    fn block_hash_parses_from_display() {
        let hash = admitted_block("payload").compute_hash();
        let parsed: BlockHash = hash.to_string().parse().expect("parses");
        assert_eq!(parsed, hash);
    }
}
