//! Navigation menu handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use blog_core::domain::{NavigationItem, NavigationItemInput, NavigationNode};
use blog_shared::EntityId;

use crate::dto::JsonBody;
use crate::error::ApiError;
use crate::response::DeletedResponse;
use crate::state::AppState;

/// GET /api/navigation: the active menu as a forest.
pub async fn get_tree(State(state): State<AppState>) -> Result<Json<Vec<NavigationNode>>, ApiError> {
    Ok(Json(state.navigation.active_tree().await?))
}

/// GET /api/navigation/admin: every item, flat.
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<NavigationItem>>, ApiError> {
    Ok(Json(state.navigation.list_all().await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<NavigationItem>, ApiError> {
    Ok(Json(state.navigation.get(id).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NavigationItemInput>,
) -> Result<(StatusCode, Json<NavigationItem>), ApiError> {
    let item = state.navigation.create(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    JsonBody(payload): JsonBody<NavigationItemInput>,
) -> Result<Json<NavigationItem>, ApiError> {
    Ok(Json(state.navigation.update(id, payload).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted_ids = state.navigation.delete(id).await?;
    Ok(Json(DeletedResponse {
        message: format!("Deleted {} navigation item(s)", deleted_ids.len()),
        deleted_ids,
    }))
}
