// ============================================================================
// Blog Core - Article Service
// File: crates/blog-core/src/services/article_service.rs
// ============================================================================

use std::sync::Arc;

use blog_shared::{EntityId, PageInfo, Pagination};
use serde::Serialize;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::domain::{Article, ArticleFilter, ArticleInput, ArticleSummary};
use crate::error::DomainError;
use crate::repositories::ArticleRepository;

const ENTITY: &str = "Article";

/// One page of the public article index.
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub articles: Vec<ArticleSummary>,
    pub pagination: PageInfo,
}

pub struct ArticleService<R: ArticleRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ArticleRepository + ?Sized> ArticleService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_published(
        &self,
        filter: ArticleFilter,
        pagination: Pagination,
    ) -> Result<ArticlePage, DomainError> {
        debug!(
            "Listing articles: page={} size={} filter={:?}",
            pagination.page, pagination.page_size, filter
        );
        let total = self.repo.count_published(&filter).await?;
        let articles = self.repo.find_published(&filter, &pagination).await?;

        Ok(ArticlePage {
            articles: articles.iter().map(ArticleSummary::from).collect(),
            pagination: PageInfo::new(total, &pagination),
        })
    }

    /// Published article by id; counts the read. Drafts are not visible here.
    pub async fn read_published(&self, id: EntityId) -> Result<Article, DomainError> {
        let mut article = self
            .repo
            .find_by_id(id)
            .await?
            .filter(Article::is_published)
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        if let Err(e) = self.repo.increment_view_count(id).await {
            // a lost view count is not worth failing the read
            warn!("Failed to record view for article {}: {}", id, e);
        } else {
            article.view_count += 1;
        }
        Ok(article)
    }

    pub async fn create(
        &self,
        input: ArticleInput,
        author_id: Option<EntityId>,
    ) -> Result<Article, DomainError> {
        let input = input.normalized();
        input.validate()?;
        let article = self.repo.create(&input, author_id).await?;
        info!("Article created: {} ({})", article.id, article.status.as_str());
        Ok(article)
    }

    pub async fn update(&self, id: EntityId, input: ArticleInput) -> Result<Article, DomainError> {
        let input = input.normalized();
        input.validate()?;
        self.ensure_exists(id).await?;
        let article = self.repo.update(id, &input).await?;
        info!("Article updated: {}", id);
        Ok(article)
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        self.ensure_exists(id).await?;
        self.repo.delete(id).await?;
        info!("Article deleted: {}", id);
        Ok(())
    }

    async fn ensure_exists(&self, id: EntityId) -> Result<(), DomainError> {
        match self.repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(ENTITY, id)),
        }
    }
}
