// ============================================================================
// Blog Infrastructure - MySQL User Repository
// File: crates/blog-infrastructure/src/database/mysql/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use tracing::{info, warn};

use blog_core::domain::{Role, User};
use blog_core::error::DomainError;
use blog_core::repositories::{UserRecord, UserRepository};
use blog_shared::EntityId;

use super::db_error;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, filter);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding user", e))?;
        Ok(row.map(Into::into))
    }

    async fn fetch_existing(&self, id: EntityId) -> Result<User, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::from_str(&row.role).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// Unique-key violations become the matching conflict error.
fn write_error(e: sqlx::Error, username: &str, email: &str) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            warn!("Duplicate user rejected by database: {}", db.message());
            return if db.message().contains("email") {
                DomainError::EmailTaken(email.to_string())
            } else {
                DomainError::UsernameTaken(username.to_string())
            };
        }
    }
    db_error("writing user", e)
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing users", e))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding user by id", e))?;
        Ok(row.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("LOWER(email)", &email.to_lowercase()).await
    }

    async fn create(&self, record: &UserRecord) -> Result<User, DomainError> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, role) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &record.username, &record.email))?;

        let id = result.last_insert_id() as EntityId;
        info!("User row inserted: {}", id);
        self.fetch_existing(id).await
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        sqlx::query(
            "UPDATE users SET username = ?, email = ?, password_hash = ?, role = ? WHERE id = ?",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username, &user.email))?;

        // rows_affected is 0 for an unchanged row in MySQL, so re-read instead
        self.fetch_existing(user.id).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }
}
