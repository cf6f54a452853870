// ============================================================================
// Blog API - Auth Handlers
// File: crates/blog-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, current user)

use axum::{extract::State, Extension, Json};
use blog_core::domain::User;
use blog_core::services::LoginResult;
use validator::Validate;

use crate::dto::{JsonBody, LoginRequest};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Login handler - POST /api/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    payload.validate()?;
    let result = state.auth.login(&payload.username, &payload.password).await?;
    Ok(Json(result))
}

/// Current user - GET /api/me
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}
