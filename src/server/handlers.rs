pub mod aeps;
pub mod estamp;
pub mod health;
pub mod user;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::server::errors::AppError;

/// Decode a JSON body regardless of the declared content type; POS
/// clients are not consistent about it.
fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Undecodable request body: {e}");
        AppError::InvalidRequestBody
    })
}
