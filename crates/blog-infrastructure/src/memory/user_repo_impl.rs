// ============================================================================
// Blog Infrastructure - In-memory User Repository
// File: crates/blog-infrastructure/src/memory/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::Utc;

use blog_core::domain::User;
use blog_core::error::DomainError;
use blog_core::repositories::{UserRecord, UserRepository};
use blog_shared::EntityId;

use super::Collection;

pub struct MemoryUserRepository {
    users: Collection<User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self { users: Collection::new() }
    }

    /// Username lookup for joins from other in-memory collections.
    pub(crate) fn username_of(&self, id: EntityId) -> Option<String> {
        self.users.find(|u| u.id == id).map(|u| u.username)
    }

    fn conflict(&self, id: Option<EntityId>, username: &str, email: &str) -> Option<DomainError> {
        let others = |u: &User| Some(u.id) != id;
        if self.users.find(|u| others(u) && u.username == username).is_some() {
            return Some(DomainError::UsernameTaken(username.to_string()));
        }
        if self.users.find(|u| others(u) && u.email.eq_ignore_ascii_case(email)).is_some() {
            return Some(DomainError::EmailTaken(email.to_string()));
        }
        None
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.all())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        Ok(self.users.find(|u| u.id == id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, record: &UserRecord) -> Result<User, DomainError> {
        if let Some(err) = self.conflict(None, &record.username, &record.email) {
            return Err(err);
        }
        Ok(self.users.insert_with(|id| User {
            id,
            username: record.username.clone(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            role: record.role,
            created_at: Utc::now(),
        }))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        if let Some(err) = self.conflict(Some(user.id), &user.username, &user.email) {
            return Err(err);
        }
        self.users
            .modify(
                |u| u.id == user.id,
                |stored| {
                    stored.username = user.username.clone();
                    stored.email = user.email.clone();
                    stored.password_hash = user.password_hash.clone();
                    stored.role = user.role;
                },
            )
            .ok_or_else(|| DomainError::not_found("User", user.id))
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        match self.users.remove(|u| u.id == id) {
            0 => Err(DomainError::not_found("User", id)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::Role;

    fn record(username: &str, email: &str) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_ids_increment_and_lookup() {
        let repo = MemoryUserRepository::new();
        let a = repo.create(&record("alice", "alice@example.com")).await.unwrap();
        let b = repo.create(&record("bob", "bob@example.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.find_by_email("BOB@example.com").await.unwrap().map(|u| u.id), Some(2));
    }

    #[tokio::test]
    async fn test_unique_constraints() {
        let repo = MemoryUserRepository::new();
        repo.create(&record("alice", "alice@example.com")).await.unwrap();
        assert!(matches!(
            repo.create(&record("alice", "other@example.com")).await,
            Err(DomainError::UsernameTaken(_))
        ));
        assert!(matches!(
            repo.create(&record("carol", "ALICE@example.com")).await,
            Err(DomainError::EmailTaken(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let repo = MemoryUserRepository::new();
        assert!(matches!(repo.delete(9).await, Err(DomainError::NotFound { id: 9, .. })));
    }
}
