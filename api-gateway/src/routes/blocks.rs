use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use star_chain::{Block, BlockHash};

use super::{ApiError, api_error, chain_error};
use crate::state::SharedState;

/// JSON view of a [`Block`] with hex hashes and the decoded body.
#[derive(Debug, Serialize)]
pub struct BlockResponse {
    pub height: u64,
    pub time: u64,
    pub hash: Option<String>,
    pub previous_block_hash: Option<String>,
    pub body: String,
    /// Decoded body; `None` if the body is not valid hex-encoded JSON.
    pub data: Option<serde_json::Value>,
}

impl From<Block> for BlockResponse {
    fn from(block: Block) -> Self {
        let data = block.decode_body::<serde_json::Value>().ok();
        BlockResponse {
            height: block.height,
            time: block.time,
            hash: block.hash.map(|h| h.to_string()),
            previous_block_hash: block.previous_block_hash.map(|h| h.to_string()),
            body: block.body,
            data,
        }
    }
}

/// `GET /block/height/{height}`
pub async fn block_by_height(
    State(state): State<SharedState>,
    Path(height): Path<u64>,
) -> Result<Json<BlockResponse>, ApiError> {
    let block = state
        .chain
        .block_by_height(height)
        .await
        .map_err(chain_error)?;
    Ok(Json(block.into()))
}

/// `GET /block/hash/{hash}`
pub async fn block_by_hash(
    State(state): State<SharedState>,
    Path(hash): Path<String>,
) -> Result<Json<BlockResponse>, ApiError> {
    let hash: BlockHash = hash
        .parse()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, "invalid_hash", format!("{e}")))?;

    match state.chain.block_by_hash(&hash).await {
        Some(block) => Ok(Json(block.into())),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            "block_not_found",
            format!("no block with hash {hash}"),
        )),
    }
}

/// Response body for `GET /validateChain`.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub ok: bool,
    pub errors: Vec<String>,
}

/// `GET /validateChain`
///
/// Always `200 OK`; discrepancies are reported as data.
pub async fn validate_chain(State(state): State<SharedState>) -> Json<ValidateResponse> {
    let found = state.chain.validate_chain().await;
    Json(ValidateResponse {
        ok: found.is_empty(),
        errors: found.iter().map(ToString::to_string).collect(),
    })
}
