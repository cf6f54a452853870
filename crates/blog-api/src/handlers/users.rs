//! User administration handlers (admin only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use blog_core::domain::{NewUser, User, UserUpdate};
use blog_shared::EntityId;

use crate::dto::JsonBody;
use crate::error::ApiError;
use crate::response::MessageResponse;
use crate::state::AppState;

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    JsonBody(payload): JsonBody<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update(id, payload).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.users.delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
