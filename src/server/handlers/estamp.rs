use axum::{body::Bytes, extract::State};
use serde_json::Value;

use super::decode_json;
use crate::server::{AppState, errors::AppError, responses::ApiResponse};

/// Forward the client body to the e-stamp vendor unchanged
pub async fn estamp(State(state): State<AppState>, body: Bytes) -> Result<ApiResponse, AppError> {
    let request: Value = decode_json(&body)?;
    let reply = state.estamp.forward(&request).await?;
    Ok(ApiResponse::from_reply(reply))
}
