//! Star registry chain library crate.
//!
//! This crate provides the core building blocks of a single-node,
//! tamper-evident star registry:
//!
//! - strongly-typed domain types and block hashing (`types`),
//! - the chain owner with block admission, queries and validation
//!   (`ledger`),
//! - the time-windowed proof-of-ownership protocol (`ownership`),
//! - the in-memory storage backend (`storage`),
//! - an async single-writer handle for sharing the chain (`service`),
//! - Prometheus-based metrics (`metrics`),
//! - a clock abstraction (`clock`),
//! - and a top-level configuration (`config`).
//!
//! Binaries (the demo in `main.rs`, the API gateway) compose these
//! pieces.

pub mod clock;
pub mod config;
pub mod ledger;
pub mod metrics;
pub mod ownership;
pub mod service;
pub mod storage;
pub mod types;

// Re-export top-level configuration types.
pub use config::{ChainConfig, MetricsConfig, OwnershipConfig};

// Re-export the chain, its errors and validation types.
pub use ledger::{BlockStore, Blockchain, ChainError, ChainValidator, Discrepancy, LinkageCheck};

// Re-export the ownership protocol.
pub use ownership::{Challenge, Ed25519Verifier, SignatureVerifier, address_of, sign_message};

// Re-export storage, service, clock and metrics handles.
pub use clock::{Clock, ManualClock, SystemClock};
pub use metrics::{ChainMetrics, MetricsRegistry, run_prometheus_http_server};
pub use service::ChainService;
pub use storage::InMemoryBlockStore;

// Re-export domain types at the crate root for convenience.
pub use types::*;

/// Type alias for the default chain stack: in-memory storage with
/// Ed25519 ownership proofs.
pub type DefaultBlockchain = Blockchain<InMemoryBlockStore, Ed25519Verifier>;

/// Type alias for the default shared chain handle.
pub type DefaultChainService = ChainService<InMemoryBlockStore, Ed25519Verifier>;
