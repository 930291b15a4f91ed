use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::SharedState;

/// Simple health-check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health`
///
/// Returns a basic JSON document indicating liveness.
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// Response body for `GET /chain/height`.
#[derive(Serialize)]
pub struct HeightResponse {
    pub height: Option<u64>,
}

/// `GET /chain/height`
pub async fn chain_height(State(state): State<SharedState>) -> Json<HeightResponse> {
    Json(HeightResponse {
        height: state.chain.height().await,
    })
}
