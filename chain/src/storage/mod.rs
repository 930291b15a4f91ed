//! Storage backends for the chain.
//!
//! This module provides the concrete implementation of the
//! [`crate::ledger::store::BlockStore`] trait: an in-memory store
//! ([`mem::InMemoryBlockStore`]) holding the chain for the lifetime of the
//! process.

pub mod mem;

pub use mem::InMemoryBlockStore;
