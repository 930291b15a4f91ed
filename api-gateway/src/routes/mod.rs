//! HTTP routes.
//!
//! Handlers translate `star_chain` results into status codes; they hold no
//! chain logic of their own.

pub mod blocks;
pub mod health;
pub mod stars;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use star_chain::ChainError;

use crate::state::SharedState;

/// Error body returned by every failing handler.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable reason.
    pub error: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, error: &'static str, message: String) -> ApiError {
    (status, Json(ErrorResponse { error, message }))
}

/// Maps chain failures to HTTP status codes.
pub(crate) fn chain_error(e: ChainError) -> ApiError {
    let status = match &e {
        ChainError::IncorrectMessageFormat(_) | ChainError::IncorrectTime(_) => {
            StatusCode::BAD_REQUEST
        }
        ChainError::UnverifiedSignature(_) => StatusCode::UNAUTHORIZED,
        ChainError::BlockNotFound(_) => StatusCode::NOT_FOUND,
        ChainError::ChainTampered(_) => StatusCode::CONFLICT,
        ChainError::Payload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ChainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.reason(), e.to_string())
}

/// Builds the API router on top of `state`.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/chain/height", get(health::chain_height))
        .route("/requestValidation", post(stars::request_validation))
        .route("/submitstar", post(stars::submit_star))
        .route("/blocks/{address}", get(stars::stars_by_address))
        .route("/block/height/{height}", get(blocks::block_by_height))
        .route("/block/hash/{hash}", get(blocks::block_by_hash))
        .route("/validateChain", get(blocks::validate_chain))
        .with_state(state)
}
