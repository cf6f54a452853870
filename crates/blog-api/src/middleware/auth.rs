//! Bearer-token authentication and role gates
//!
//! `require_auth` must run before the role gates: it resolves the token and
//! stores the account as a [`CurrentUser`] request extension.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use blog_core::domain::User;
use blog_core::error::DomainError;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated account for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let user = state.auth.authenticate(&token).await.map_err(|e| match e {
        DomainError::DatabaseError(_) => ApiError::from(e),
        other => ApiError::Unauthorized(other.to_string()),
    })?;

    debug!("Authenticated request for user {}", user.id);
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

fn current_user(request: &Request) -> Result<&User, ApiError> {
    request
        .extensions()
        .get::<CurrentUser>()
        .map(|current| &current.0)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = current_user(&request)?;
    if !user.role.is_admin() {
        return Err(ApiError::Forbidden("Admin role required".to_string()));
    }
    Ok(next.run(request).await)
}

pub async fn require_editor(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = current_user(&request)?;
    if !user.role.can_edit_content() {
        return Err(ApiError::Forbidden("Editor or admin role required".to_string()));
    }
    Ok(next.run(request).await)
}
