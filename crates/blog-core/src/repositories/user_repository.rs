//! User repository trait (port)

use async_trait::async_trait;
use blog_shared::EntityId;

use crate::domain::{Role, User};
use crate::error::DomainError;

/// Insert payload with an already hashed password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, record: &UserRecord) -> Result<User, DomainError>;
    async fn update(&self, user: &User) -> Result<User, DomainError>;
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
