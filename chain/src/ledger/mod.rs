//! The chain itself.
//!
//! This module provides the single-instance ledger consisting of:
//!
//! - the storage interface ([`store::BlockStore`]),
//! - the chain owner with block admission and the ownership workflow
//!   ([`engine::Blockchain`]),
//! - read-only queries (`query`),
//! - whole-chain validation ([`validator::ChainValidator`]),
//! - and the error type shared by all of them ([`error::ChainError`]).

pub mod engine;
pub mod error;
mod query;
pub mod store;
pub mod validator;

pub use engine::Blockchain;
pub use error::ChainError;
pub use store::BlockStore;
pub use validator::{ChainValidator, Discrepancy, LinkageCheck};
