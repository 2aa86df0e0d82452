use axum::{
    Json,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::user::User;

pub async fn register_user(body: Bytes) -> Response {
    match serde_json::from_slice::<User>(&body) {
        Ok(user) => {
            tracing::info!("User record accepted");
            Json(json!({
                "status": "success",
                "message": "User registered successfully",
                "data": user,
            }))
            .into_response()
        }
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "Invalid request body"})),
        )
            .into_response(),
    }
}
