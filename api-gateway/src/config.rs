//! API gateway configuration.
//!
//! Parsed from command-line flags with environment fallbacks, then
//! turned into the `star_chain::ChainConfig` the embedded chain runs with.

use std::net::SocketAddr;

use clap::{ArgAction, Parser};

use star_chain::config::DEFAULT_VALIDITY_WINDOW_SECS;
use star_chain::{ChainConfig, LinkageCheck, MetricsConfig, OwnershipConfig};

/// Star registry HTTP API.
///
/// Serves ownership challenges, star submissions, block lookups and chain
/// validation over JSON, backed by a single in-memory chain.
#[derive(Parser, Debug, Clone)]
#[command(name = "api-gateway", about = "Star registry HTTP API", version)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to.
    ///
    /// Binds to all interfaces by default so a container port mapping is
    /// reachable from the host.
    #[arg(long, env = "STAR_API_LISTEN_ADDR", default_value = "0.0.0.0:8081")]
    pub listen_addr: SocketAddr,

    /// Address of the Prometheus `/metrics` exporter.
    #[arg(long, env = "STAR_METRICS_ADDR", default_value = "127.0.0.1:9898")]
    pub metrics_addr: SocketAddr,

    /// Whether to run the metrics exporter.
    #[arg(long, env = "STAR_METRICS_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub metrics_enabled: bool,

    /// Maximum age of an ownership challenge, in seconds.
    #[arg(long, env = "STAR_VALIDITY_WINDOW_SECS", default_value_t = DEFAULT_VALIDITY_WINDOW_SECS)]
    pub validity_window_secs: u64,

    /// Validate linkage against each block's direct predecessor instead of
    /// the lagged comparison.
    #[arg(long, env = "STAR_STRICT_LINKAGE")]
    pub strict_linkage: bool,
}

impl ApiConfig {
    /// Chain configuration derived from the flags.
    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            ownership: OwnershipConfig {
                validity_window_secs: self.validity_window_secs,
                ..OwnershipConfig::default()
            },
            linkage: if self.strict_linkage {
                LinkageCheck::Direct
            } else {
                LinkageCheck::Lagged
            },
            metrics: MetricsConfig {
                enabled: self.metrics_enabled,
                listen_addr: self.metrics_addr,
            },
            ..ChainConfig::default()
        }
    }
}
