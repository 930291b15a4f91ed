//! Metrics and instrumentation for the chain.
//!
//! This module defines Prometheus-compatible metrics for block admission
//! and chain validation, and exposes a small HTTP exporter that serves
//! `/metrics` in Prometheus text format.
//!
//! Typical usage in a node:
//!
//! ```ignore
//! use std::sync::Arc;
//! use star_chain::metrics::{MetricsRegistry, run_prometheus_http_server};
//!
//! let registry = Arc::new(MetricsRegistry::new()?);
//!
//! // Spawn the HTTP exporter in the background:
//! tokio::spawn(run_prometheus_http_server(registry.clone(), cfg.metrics.listen_addr));
//!
//! // Hand the chain metrics to the service:
//! let service = ChainService::new(chain).with_metrics(registry.chain.clone());
//! ```

pub mod prometheus;

pub use self::prometheus::{ChainMetrics, MetricsRegistry, run_prometheus_http_server};
