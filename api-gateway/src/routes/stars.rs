use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use star_chain::{Star, StarOwnership};

use super::blocks::BlockResponse;
use super::{ApiError, api_error, chain_error};
use crate::state::SharedState;

/// Request body for `POST /requestValidation`.
#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    /// Hex-encoded Ed25519 public key of the owner.
    pub address: String,
}

/// Response body for `POST /requestValidation`.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    /// The exact message the owner has to sign.
    pub message: String,
}

/// `POST /requestValidation`
pub async fn request_validation(
    State(state): State<SharedState>,
    Json(body): Json<ValidationRequest>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let address = body.address.trim();
    if address.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "missing_address",
            "address must not be empty".to_string(),
        ));
    }

    let challenge = state.chain.request_validation(address).await;
    Ok(Json(ValidationResponse {
        message: challenge.message(),
    }))
}

/// Request body for `POST /submitstar`.
#[derive(Debug, Deserialize)]
pub struct SubmitStarRequest {
    pub address: String,
    pub message: String,
    /// Hex-encoded Ed25519 signature over `message`.
    pub signature: String,
    pub star: Star,
}

/// `POST /submitstar`
///
/// Verifies the ownership proof and appends a block carrying the star.
pub async fn submit_star(
    State(state): State<SharedState>,
    Json(body): Json<SubmitStarRequest>,
) -> Result<(StatusCode, Json<BlockResponse>), ApiError> {
    let block = state
        .chain
        .submit_star(&body.address, &body.message, &body.signature, body.star)
        .await
        .map_err(chain_error)?;

    tracing::info!(height = block.height, owner = %body.address, "star registered");
    Ok((StatusCode::CREATED, Json(block.into())))
}

/// `GET /blocks/{address}`
pub async fn stars_by_address(
    State(state): State<SharedState>,
    Path(address): Path<String>,
) -> Json<Vec<StarOwnership>> {
    Json(state.chain.stars_by_owner(&address).await)
}
