//! Article repository trait (port)

use async_trait::async_trait;
use blog_shared::{EntityId, Pagination};

use crate::domain::{Article, ArticleFilter, ArticleInput};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Published articles matching `filter`, newest first.
    async fn find_published(
        &self,
        filter: &ArticleFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Article>, DomainError>;
    async fn count_published(&self, filter: &ArticleFilter) -> Result<u64, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Article>, DomainError>;
    async fn increment_view_count(&self, id: EntityId) -> Result<(), DomainError>;
    async fn create(&self, input: &ArticleInput, author_id: Option<EntityId>) -> Result<Article, DomainError>;
    async fn update(&self, id: EntityId, input: &ArticleInput) -> Result<Article, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
