//! Core domain types used by the chain
//!
//! This module defines strongly-typed hashes, the [`Block`] record and the
//! star-registry payloads that ride inside block bodies. The goal is to
//! avoid "naked" byte buffers and hex strings in public APIs and instead
//! use domain-specific newtypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Block record, canonical hashing and payload encoding.
pub mod block;
/// Star registration payloads stored in block bodies.
pub mod star;

pub use block::{Block, BlockHash, PayloadError};
pub use star::{Star, StarOwnership, StarRecord};

/// Length in bytes of all 256-bit hash types used in this module.
pub const HASH_LEN: usize = 32;

/// Strongly-typed 256-bit hash wrapper (BLAKE3-256).
///
/// This is the backing representation for block hashes. It is always
/// exactly [`HASH_LEN`] bytes long and renders as lowercase hex.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; HASH_LEN]);

impl Hash256 {
    /// Computes a new [`Hash256`] as the BLAKE3-256 hash of `data`.
    ///
    /// The result is deterministic for a given byte slice and is suitable
    /// for use as an identifier or content hash, but it is **not**
    /// a password hash or KDF.
    pub fn compute(data: &[u8]) -> Self {
        let h = blake3::hash(data);
        Hash256(*h.as_bytes())
    }

    /// Returns the underlying 32-byte hash as a borrowed array.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Lowercase hex rendering of the hash.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error returned when parsing a [`Hash256`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    #[error("invalid hex encoding")]
    InvalidHex,
    #[error("expected 32-byte hash, got {0} bytes")]
    InvalidLength(usize),
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| HashParseError::InvalidHex)?;
        let arr: [u8; HASH_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| HashParseError::InvalidLength(bytes.len()))?;
        Ok(Hash256(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_hex_roundtrips_through_from_str() {
        let h = Hash256::compute(b"star registry");
        let parsed: Hash256 = h.to_hex().parse().expect("valid hex hash");
        assert_eq!(parsed, h);
    }

    #[test]
    fn from_str_rejects_bad_input() {
        assert_eq!("zz".parse::<Hash256>(), Err(HashParseError::InvalidHex));
        assert_eq!(
            "abcd".parse::<Hash256>(),
            Err(HashParseError::InvalidLength(2))
        );
    }
}
