// ============================================================================
// Blog Infrastructure - In-memory Article Repository
// File: crates/blog-infrastructure/src/memory/article_repo_impl.rs
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use blog_core::domain::{Article, ArticleFilter, ArticleInput, AuthorRef};
use blog_core::error::DomainError;
use blog_core::repositories::ArticleRepository;
use blog_shared::{EntityId, Pagination};

use super::{Collection, MemoryUserRepository};

pub struct MemoryArticleRepository {
    articles: Collection<Article>,
    users: Option<Arc<MemoryUserRepository>>,
}

impl MemoryArticleRepository {
    pub fn new() -> Self {
        Self { articles: Collection::new(), users: None }
    }

    /// Resolves `author` from the given user collection on every read.
    pub fn with_users(users: Arc<MemoryUserRepository>) -> Self {
        Self { articles: Collection::new(), users: Some(users) }
    }

    fn with_author(&self, mut article: Article) -> Article {
        article.author = article
            .author_id
            .and_then(|id| self.users.as_ref()?.username_of(id))
            .map(|username| AuthorRef { username });
        article
    }
}

impl Default for MemoryArticleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticleRepository {
    async fn find_published(
        &self,
        filter: &ArticleFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Article>, DomainError> {
        let mut published: Vec<Article> = self
            .articles
            .all()
            .into_iter()
            .filter(|a| a.is_published() && filter.matches(a))
            .collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(published
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .map(|a| self.with_author(a))
            .collect())
    }

    async fn count_published(&self, filter: &ArticleFilter) -> Result<u64, DomainError> {
        Ok(self.articles.count(|a| a.is_published() && filter.matches(a)) as u64)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Article>, DomainError> {
        Ok(self.articles.find(|a| a.id == id).map(|a| self.with_author(a)))
    }

    async fn increment_view_count(&self, id: EntityId) -> Result<(), DomainError> {
        self.articles
            .modify(|a| a.id == id, |a| a.view_count += 1)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Article", id))
    }

    async fn create(&self, input: &ArticleInput, author_id: Option<EntityId>) -> Result<Article, DomainError> {
        let now = Utc::now();
        let article = self.articles.insert_with(|id| Article {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            summary: input.summary.clone(),
            category: input.category.clone(),
            tags: input.tags.clone(),
            cover: input.cover.clone(),
            status: input.status,
            view_count: 0,
            author_id,
            author: None,
            created_at: now,
            updated_at: now,
        });
        Ok(self.with_author(article))
    }

    async fn update(&self, id: EntityId, input: &ArticleInput) -> Result<Article, DomainError> {
        self.articles
            .modify(
                |a| a.id == id,
                |a| {
                    a.title = input.title.clone();
                    a.content = input.content.clone();
                    a.summary = input.summary.clone();
                    a.category = input.category.clone();
                    a.tags = input.tags.clone();
                    a.cover = input.cover.clone();
                    a.status = input.status;
                    a.updated_at = Utc::now();
                },
            )
            .map(|a| self.with_author(a))
            .ok_or_else(|| DomainError::not_found("Article", id))
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        match self.articles.remove(|a| a.id == id) {
            0 => Err(DomainError::not_found("Article", id)),
            _ => Ok(()),
        }
    }
}
