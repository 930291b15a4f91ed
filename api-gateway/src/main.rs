// api-gateway/src/main.rs

//! API gateway binary.
//!
//! This binary exposes the star registry over HTTP on top of the
//! `star_chain` crate:
//!
//! - `GET /health`, `GET /chain/height`
//! - `POST /requestValidation`, `POST /submitstar`
//! - `GET /block/height/{height}`, `GET /block/hash/{hash}`
//! - `GET /blocks/{address}`, `GET /validateChain`
//!
//! It embeds a `DefaultBlockchain` (in-memory, Ed25519 ownership proofs)
//! behind a `ChainService`, and a Prometheus metrics exporter on `/metrics`.

mod config;
mod routes;
mod state;

use std::sync::Arc;

use clap::Parser;
use tokio::signal;

use star_chain::{
    ChainService, DefaultBlockchain, Ed25519Verifier, InMemoryBlockStore, MetricsRegistry,
    run_prometheus_http_server,
};
use config::ApiConfig;
use state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    // Basic tracing setup.
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api_gateway=info,star_chain=info".to_string()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let api_cfg = ApiConfig::parse();
    let chain_cfg = api_cfg.chain_config();

    // ---------------------------
    // Metrics
    // ---------------------------

    let metrics = Arc::new(
        MetricsRegistry::new()
            .map_err(|e| format!("failed to initialise metrics registry: {e}"))?,
    );

    if chain_cfg.metrics.enabled {
        let metrics_clone = metrics.clone();
        let addr = chain_cfg.metrics.listen_addr;
        tokio::spawn(async move {
            if let Err(e) = run_prometheus_http_server(metrics_clone, addr).await {
                tracing::error!("metrics HTTP server error: {e}");
            }
        });
        tracing::info!("metrics exporter listening on http://{}/metrics", addr);
    }

    // ---------------------------
    // Chain
    // ---------------------------

    tracing::info!(
        linkage = ?chain_cfg.linkage,
        window_secs = chain_cfg.ownership.validity_window_secs,
        "starting star registry"
    );

    let chain = DefaultBlockchain::new(chain_cfg, InMemoryBlockStore::new(), Ed25519Verifier)
        .map_err(|e| format!("failed to initialise chain: {e}"))?;

    let app_state: SharedState = Arc::new(AppState {
        chain: ChainService::new(chain).with_metrics(metrics.chain.clone()),
    });

    // ---------------------------
    // axum 0.8 server
    // ---------------------------

    let app = routes::router(app_state);

    tracing::info!("API gateway listening on http://{}", api_cfg.listen_addr);

    let listener = tokio::net::TcpListener::bind(api_cfg.listen_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", api_cfg.listen_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("API server error: {e}"))?;

    Ok(())
}

/// Waits for Ctrl-C and returns, used for graceful shutdown.
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
