//! HTTP handlers

pub mod health;
pub mod auth;
pub mod users;
pub mod articles;
pub mod navigation;

use axum::http::StatusCode;
use axum::Json;

use crate::response::MessageResponse;

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Route not found")))
}
