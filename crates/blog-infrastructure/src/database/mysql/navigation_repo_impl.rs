// ============================================================================
// Blog Infrastructure - MySQL Navigation Repository
// File: crates/blog-infrastructure/src/database/mysql/navigation_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use tracing::info;

use blog_core::domain::{NavigationItem, NavigationItemInput};
use blog_core::error::DomainError;
use blog_core::repositories::NavigationRepository;
use blog_shared::EntityId;

use super::db_error;

const NAV_COLUMNS: &str = "id, title, path, icon, order_num, is_active, parent_id";

pub struct MySqlNavigationRepository {
    pool: MySqlPool,
}

impl MySqlNavigationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_existing(&self, id: EntityId) -> Result<NavigationItem, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Navigation item", id))
    }
}

#[derive(Debug, FromRow)]
struct NavigationRow {
    id: i64,
    title: String,
    path: String,
    icon: Option<String>,
    order_num: i32,
    is_active: bool,
    parent_id: Option<i64>,
}

impl From<NavigationRow> for NavigationItem {
    fn from(row: NavigationRow) -> Self {
        NavigationItem {
            id: row.id,
            title: row.title,
            path: row.path,
            icon: row.icon,
            order: row.order_num,
            is_active: row.is_active,
            parent_id: row.parent_id,
        }
    }
}

#[async_trait]
impl NavigationRepository for MySqlNavigationRepository {
    async fn find_all(&self) -> Result<Vec<NavigationItem>, DomainError> {
        let sql = format!("SELECT {} FROM navigation_items", NAV_COLUMNS);
        let rows: Vec<NavigationRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing navigation items", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<NavigationItem>, DomainError> {
        let sql = format!("SELECT {} FROM navigation_items WHERE id = ?", NAV_COLUMNS);
        let row: Option<NavigationRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding navigation item", e))?;
        Ok(row.map(Into::into))
    }

    async fn create(&self, input: &NavigationItemInput) -> Result<NavigationItem, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO navigation_items (title, path, icon, order_num, is_active, parent_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.path)
        .bind(&input.icon)
        .bind(input.order)
        .bind(input.is_active)
        .bind(input.parent_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("creating navigation item", e))?;

        let id = result.last_insert_id() as EntityId;
        info!("Navigation row inserted: {}", id);
        self.fetch_existing(id).await
    }

    async fn update(&self, id: EntityId, input: &NavigationItemInput) -> Result<NavigationItem, DomainError> {
        sqlx::query(
            r#"
            UPDATE navigation_items
            SET title = ?, path = ?, icon = ?, order_num = ?, is_active = ?, parent_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.path)
        .bind(&input.icon)
        .bind(input.order)
        .bind(input.is_active)
        .bind(input.parent_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("updating navigation item", e))?;

        self.fetch_existing(id).await
    }

    async fn delete_many(&self, ids: &[EntityId]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("DELETE FROM navigation_items WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting navigation items", e))?;
        Ok(result.rows_affected())
    }
}
