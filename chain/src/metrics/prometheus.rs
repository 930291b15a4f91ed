//! Prometheus-backed metrics and HTTP exporter.
//!
//! This module defines a [`MetricsRegistry`] that owns a Prometheus
//! registry and a set of strongly-typed chain metrics, and an async HTTP
//! exporter that serves `/metrics` using `hyper`.

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    Method, Request, Response, StatusCode, body::Incoming, header, server::conn::http1,
    service::service_fn,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use prometheus::{
    self, Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Chain-related Prometheus metrics.
///
/// These are registered into a [`Registry`] and updated by
/// [`crate::service::ChainService`].
#[derive(Clone)]
pub struct ChainMetrics {
    /// Blocks appended through verified submissions.
    pub blocks_admitted: IntCounter,
    /// Current tip height.
    pub chain_height: IntGauge,
    /// Rejected submissions, labelled by `reason`.
    pub submissions_rejected: IntCounterVec,
    /// Latency of a full chain validation pass, in seconds.
    pub validation_seconds: Histogram,
    /// Discrepancies reported across all validation passes.
    pub discrepancies_found: IntCounter,
}

impl ChainMetrics {
    /// Registers chain metrics into the given `Registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let blocks_admitted = IntCounter::with_opts(Opts::new(
            "blocks_admitted_total",
            "Total number of blocks admitted after ownership verification",
        ))?;
        registry.register(Box::new(blocks_admitted.clone()))?;

        let chain_height = IntGauge::with_opts(Opts::new(
            "chain_height",
            "Height of the current tip block",
        ))?;
        registry.register(Box::new(chain_height.clone()))?;

        let submissions_rejected = IntCounterVec::new(
            Opts::new(
                "submissions_rejected_total",
                "Total number of rejected star submissions by reason",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(submissions_rejected.clone()))?;

        let validation_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "validation_seconds",
                "Time to validate the whole chain in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ]),
        )?;
        registry.register(Box::new(validation_seconds.clone()))?;

        let discrepancies_found = IntCounter::with_opts(Opts::new(
            "discrepancies_found_total",
            "Total number of discrepancies reported by chain validation",
        ))?;
        registry.register(Box::new(discrepancies_found.clone()))?;

        Ok(Self {
            blocks_admitted,
            chain_height,
            submissions_rejected,
            validation_seconds,
            discrepancies_found,
        })
    }
}

/// Wrapper around a Prometheus registry and the chain metrics.
///
/// This is the main handle you pass around in the node. It can be wrapped
/// in an [`Arc`] and shared across threads/tasks.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,
    pub chain: ChainMetrics,
}

impl MetricsRegistry {
    /// Creates a new `MetricsRegistry` with a fresh underlying `Registry`
    /// and registers the chain metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("starchain".to_string()), None)?;
        let chain = ChainMetrics::register(&registry)?;
        Ok(Self { registry, chain })
    }

    /// Encodes all metrics in this registry into the Prometheus text format.
    pub fn gather_text(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::warn!("failed to encode Prometheus metrics: {e}");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// Runs an HTTP server that exposes Prometheus metrics.
///
/// The server listens on `addr` and serves `GET /metrics` with the
/// Prometheus text exposition format. All other paths return 404.
///
/// ```ignore
/// let registry = Arc::new(MetricsRegistry::new()?);
/// tokio::spawn(run_prometheus_http_server(registry.clone(), cfg.metrics.listen_addr));
/// ```
pub async fn run_prometheus_http_server(
    metrics: Arc<MetricsRegistry>,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let metrics = metrics.clone();

        tokio::spawn(async move {
            let svc = service_fn(move |req| {
                let metrics = metrics.clone();
                handle_request(req, metrics)
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, svc).await {
                tracing::warn!("prometheus HTTP server error: {err}");
            }
        });
    }
}

async fn handle_request(
    req: Request<Incoming>,
    metrics: Arc<MetricsRegistry>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(route(req.method(), req.uri().path(), &metrics))
}

fn route(method: &Method, path: &str, metrics: &MetricsRegistry) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::GET, "/metrics") => {
            let mut resp = Response::new(Full::new(Bytes::from(metrics.gather_text())));
            resp.headers_mut().insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("text/plain; version=0.0.4"),
            );
            resp
        }
        _ => {
            let mut resp = Response::new(Full::new(Bytes::from("not found")));
            *resp.status_mut() = StatusCode::NOT_FOUND;
            resp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn chain_metrics_register_and_record() {
        let registry = Registry::new();
        let metrics = ChainMetrics::register(&registry).expect("register metrics");

        metrics.blocks_admitted.inc();
        metrics.chain_height.set(3);
        metrics
            .submissions_rejected
            .with_label_values(&["incorrect_time"])
            .inc();
        metrics.validation_seconds.observe(0.002);
        metrics.discrepancies_found.inc_by(2);

        let metric_families = registry.gather();
        assert_eq!(metric_families.len(), 5);
    }

    #[test]
    fn metrics_registry_gather_text_works() {
        let registry = MetricsRegistry::new().expect("create metrics registry");
        registry.chain.chain_height.set(7);
        let text = registry.gather_text();
        assert!(text.contains("starchain_chain_height 7"));
    }

    #[test]
    fn only_get_metrics_is_served() {
        let registry = MetricsRegistry::new().expect("create metrics registry");

        let ok = route(&Method::GET, "/metrics", &registry);
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(
            ok.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"text/plain; version=0.0.4"[..])
        );

        assert_eq!(
            route(&Method::POST, "/metrics", &registry).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            route(&Method::GET, "/", &registry).status(),
            StatusCode::NOT_FOUND
        );
    }
}
