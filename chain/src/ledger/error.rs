use thiserror::Error;

use crate::types::PayloadError;

use super::validator::Discrepancy;

/// Errors surfaced by chain operations.
///
/// Every variant renders as a short human-readable reason so callers can
/// relay it to clients as-is.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Challenge message does not have exactly three `:`-separated fields.
    #[error("incorrect message format: expected `<address>:<timestamp>:<tag>`, got {0:?}")]
    IncorrectMessageFormat(String),

    /// Challenge expired, or its timestamp is not a positive integer.
    #[error("incorrect time: {0}")]
    IncorrectTime(String),

    /// Signature does not verify for the message and address.
    #[error("signature could not be verified for address {0}")]
    UnverifiedSignature(String),

    /// No block at the requested height.
    #[error("block not found at height {0}")]
    BlockNotFound(u64),

    /// The validator found one or more discrepancies.
    #[error("chain tampered: {} discrepancies found", .0.len())]
    ChainTampered(Vec<Discrepancy>),

    /// Block body could not be encoded or decoded.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// An internal invariant could not be established.
    #[error("internal chain error: {0}")]
    Internal(String),
}

impl ChainError {
    /// Stable snake_case label, used for metric labels and API bodies.
    pub fn reason(&self) -> &'static str {
        match self {
            ChainError::IncorrectMessageFormat(_) => "incorrect_message_format",
            ChainError::IncorrectTime(_) => "incorrect_time",
            ChainError::UnverifiedSignature(_) => "unverified_signature",
            ChainError::BlockNotFound(_) => "block_not_found",
            ChainError::ChainTampered(_) => "chain_tampered",
            ChainError::Payload(_) => "payload",
            ChainError::Internal(_) => "internal",
        }
    }
}
