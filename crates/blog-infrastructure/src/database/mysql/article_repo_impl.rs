// ============================================================================
// Blog Infrastructure - MySQL Article Repository
// File: crates/blog-infrastructure/src/database/mysql/article_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use tracing::info;

use blog_core::domain::{Article, ArticleFilter, ArticleInput, ArticleStatus, AuthorRef};
use blog_core::error::DomainError;
use blog_core::repositories::ArticleRepository;
use blog_shared::{EntityId, Pagination};

use super::db_error;

const ARTICLE_SELECT: &str = r#"
    SELECT
        a.id, a.title, a.content, a.summary, a.category, a.tags, a.cover,
        a.status, a.view_count, a.author_id, u.username AS author_username,
        a.created_at, a.updated_at
    FROM articles a
    LEFT JOIN users u ON u.id = a.author_id
"#;

pub struct MySqlArticleRepository {
    pool: MySqlPool,
}

impl MySqlArticleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_existing(&self, id: EntityId) -> Result<Article, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Article", id))
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    summary: Option<String>,
    category: Option<String>,
    tags: Option<String>,
    cover: Option<String>,
    status: String,
    view_count: i64,
    author_id: Option<i64>,
    author_username: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            title: row.title,
            content: row.content,
            summary: row.summary,
            category: row.category,
            // tags are stored as a JSON array in a text column
            tags: row
                .tags
                .as_deref()
                .and_then(|t| serde_json::from_str(t).ok())
                .unwrap_or_default(),
            cover: row.cover,
            status: ArticleStatus::from_str(&row.status).unwrap_or(ArticleStatus::Draft),
            view_count: row.view_count,
            author_id: row.author_id,
            author: row.author_username.map(|username| AuthorRef { username }),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Appends the published-only condition and the optional filters.
fn push_published_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &ArticleFilter) {
    builder.push(" WHERE a.status = 'published'");
    if let Some(category) = &filter.category {
        builder.push(" AND a.category = ").push_bind(category.clone());
    }
    if let Some(tag) = &filter.tag {
        builder
            .push(" AND JSON_CONTAINS(a.tags, JSON_QUOTE(")
            .push_bind(tag.clone())
            .push("))");
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        builder
            .push(" AND (a.title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.summary LIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.content LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn tags_json(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

#[async_trait]
impl ArticleRepository for MySqlArticleRepository {
    async fn find_published(
        &self,
        filter: &ArticleFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Article>, DomainError> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(ARTICLE_SELECT);
        push_published_filter(&mut builder, filter);
        builder
            .push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<ArticleRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing articles", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_published(&self, filter: &ArticleFilter) -> Result<u64, DomainError> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        push_published_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting articles", e))?;
        Ok(count.max(0) as u64)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Article>, DomainError> {
        let sql = format!("{} WHERE a.id = ?", ARTICLE_SELECT);
        let row: Option<ArticleRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding article", e))?;
        Ok(row.map(Into::into))
    }

    async fn increment_view_count(&self, id: EntityId) -> Result<(), DomainError> {
        sqlx::query("UPDATE articles SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("counting article view", e))?;
        Ok(())
    }

    async fn create(&self, input: &ArticleInput, author_id: Option<EntityId>) -> Result<Article, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO articles (title, content, summary, category, tags, cover, status, author_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.summary)
        .bind(&input.category)
        .bind(tags_json(&input.tags))
        .bind(&input.cover)
        .bind(input.status.as_str())
        .bind(author_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("creating article", e))?;

        let id = result.last_insert_id() as EntityId;
        info!("Article row inserted: {}", id);
        self.fetch_existing(id).await
    }

    async fn update(&self, id: EntityId, input: &ArticleInput) -> Result<Article, DomainError> {
        sqlx::query(
            r#"
            UPDATE articles
            SET title = ?, content = ?, summary = ?, category = ?, tags = ?, cover = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.summary)
        .bind(&input.category)
        .bind(tags_json(&input.tags))
        .bind(&input.cover)
        .bind(input.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("updating article", e))?;

        self.fetch_existing(id).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting article", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Article", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_sql_binds_each_condition() {
        let filter = ArticleFilter::new(Some("tech".into()), Some("rust".into()), Some("50%_off".into()));
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        push_published_filter(&mut builder, &filter);

        let sql = builder.sql();
        assert!(sql.contains("a.status = 'published'"));
        assert!(sql.contains("a.category = ?"));
        assert!(sql.contains("JSON_CONTAINS(a.tags, JSON_QUOTE(?))"));
        assert_eq!(sql.matches("LIKE ?").count(), 3);
    }

    #[test]
    fn test_unfiltered_sql_only_checks_status() {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        push_published_filter(&mut builder, &ArticleFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM articles a WHERE a.status = 'published'");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }
}
