//! Article handlers: public reads, editor writes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use blog_core::domain::{Article, ArticleInput};
use blog_core::services::ArticlePage;
use blog_shared::EntityId;

use crate::dto::{ArticleListQuery, JsonBody, QueryParams};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/articles?page=&pageSize=&category=&tag=&search=
pub async fn list_articles(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ArticleListQuery>,
) -> Result<Json<ArticlePage>, ApiError> {
    let page = state
        .articles
        .list_published(query.filter(), query.pagination())
        .await?;
    Ok(Json(page))
}

/// GET /api/articles/{id}; counts a view.
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Article>, ApiError> {
    Ok(Json(state.articles.read_published(id).await?))
}

pub async fn create_article(
    State(state): State<AppState>,
    Extension(CurrentUser(author)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<ArticleInput>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let article = state.articles.create(payload, Some(author.id)).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    JsonBody(payload): JsonBody<ArticleInput>,
) -> Result<Json<Article>, ApiError> {
    Ok(Json(state.articles.update(id, payload).await?))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.articles.delete(id).await?;
    Ok(Json(MessageResponse::new("Article deleted")))
}
