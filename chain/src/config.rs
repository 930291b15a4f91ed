//! Top-level configuration for a chain instance.
//!
//! This module aggregates configuration for:
//!
//! - the ownership protocol (validity window + challenge tag),
//! - chain validation (`LinkageCheck`),
//! - the genesis payload,
//! - metrics exporter (enable flag + listen address).
//!
//! Binaries construct a single `ChainConfig` from defaults and whatever
//! overrides they accept (see the API gateway's CLI flags).

use std::net::SocketAddr;

use crate::ledger::LinkageCheck;

/// Challenges older than this many seconds are rejected.
pub const DEFAULT_VALIDITY_WINDOW_SECS: u64 = 300;

/// Third field of every challenge message.
pub const DEFAULT_PROTOCOL_TAG: &str = "starRegistry";

/// Payload of the block created at height 0.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Configuration of the ownership verification protocol.
#[derive(Clone, Debug)]
pub struct OwnershipConfig {
    /// Maximum challenge age in seconds (exclusive).
    pub validity_window_secs: u64,
    /// Tag embedded as the last field of issued challenges.
    pub protocol_tag: String,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            validity_window_secs: DEFAULT_VALIDITY_WINDOW_SECS,
            protocol_tag: DEFAULT_PROTOCOL_TAG.to_string(),
        }
    }
}

/// Configuration for the Prometheus metrics exporter.
#[derive(Clone, Debug)]
pub struct MetricsConfig {
    /// Whether to run a `/metrics` HTTP exporter.
    pub enabled: bool,
    /// Address to bind the metrics HTTP server to.
    pub listen_addr: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 9898)),
        }
    }
}

/// Top-level configuration for a chain instance.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub ownership: OwnershipConfig,
    pub linkage: LinkageCheck,
    pub genesis_data: String,
    pub metrics: MetricsConfig,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            ownership: OwnershipConfig::default(),
            linkage: LinkageCheck::default(),
            genesis_data: GENESIS_DATA.to_string(),
            metrics: MetricsConfig::default(),
        }
    }
}
