//! Shared application state.

use std::sync::Arc;

use star_chain::DefaultChainService;

/// Shared state held by the API handlers.
///
/// This is wrapped in an [`Arc`] and passed to request handlers via Axum's
/// `State` extractor. All chain access goes through the service, which
/// serializes writers.
pub struct AppState {
    /// Embedded chain (in-memory store + Ed25519 ownership proofs).
    pub chain: DefaultChainService,
}

/// Thread-safe alias for `AppState`.
pub type SharedState = Arc<AppState>;
