//! Ownership verification protocol.
//!
//! This module provides the two halves of the stateless proof-of-ownership
//! handshake that gates block admission:
//!
//! - [`challenge::Challenge`]: issuing, parsing and time-window checks for
//!   the message a client must sign.
//! - [`verifier::SignatureVerifier`]: the signature primitive, with an
//!   Ed25519 implementation ([`verifier::Ed25519Verifier`]).
//!
//! The submission workflow itself lives on
//! [`crate::ledger::Blockchain::submit_star`].

pub mod challenge;
pub mod verifier;

pub use challenge::Challenge;
pub use verifier::{Ed25519Verifier, SignatureVerifier, address_of, sign_message};
