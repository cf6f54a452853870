// ============================================================================
// Blog Core - User Service
// File: crates/blog-core/src/services/user_service.rs
// ============================================================================
//! Account administration: list, create, update, delete

use std::sync::Arc;

use blog_security::PasswordService;
use blog_shared::{utils::mask_email, EntityId};
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{NewUser, Role, User, UserUpdate};
use crate::error::DomainError;
use crate::repositories::{UserRecord, UserRepository};

const ENTITY: &str = "User";

pub struct UserService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.user_repo.find_all().await
    }

    pub async fn get(&self, id: EntityId) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        new_user.validate()?;
        let username = new_user.username.trim().to_string();
        let email = new_user.email.trim().to_lowercase();

        if self.user_repo.find_by_username(&username).await?.is_some() {
            warn!("User creation failed: username taken: {}", username);
            return Err(DomainError::UsernameTaken(username));
        }
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("User creation failed: email taken: {}", mask_email(&email));
            return Err(DomainError::EmailTaken(email));
        }

        let password_hash = PasswordService::hash(&new_user.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        let user = self
            .user_repo
            .create(&UserRecord { username, email, password_hash, role: new_user.role })
            .await?;
        info!("User created: {} ({})", user.id, user.username);
        Ok(user)
    }

    pub async fn update(&self, id: EntityId, update: UserUpdate) -> Result<User, DomainError> {
        update.validate()?;
        let mut user = self.get(id).await?;
        if update.is_empty() {
            return Ok(user);
        }

        if let Some(username) = update.username.as_deref().map(str::trim) {
            if let Some(other) = self.user_repo.find_by_username(username).await? {
                if other.id != id {
                    return Err(DomainError::UsernameTaken(username.to_string()));
                }
            }
            user.username = username.to_string();
        }

        if let Some(email) = update.email.as_deref().map(|e| e.trim().to_lowercase()) {
            if let Some(other) = self.user_repo.find_by_email(&email).await? {
                if other.id != id {
                    return Err(DomainError::EmailTaken(email));
                }
            }
            user.email = email;
        }

        if let Some(password) = update.password.as_deref() {
            user.password_hash = PasswordService::hash(password)
                .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        }

        if let Some(role) = update.role {
            user.role = role;
        }

        let user = self.user_repo.update(&user).await?;
        info!("User updated: {}", id);
        Ok(user)
    }

    /// Admin accounts are never deleted.
    pub async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        let user = self.get(id).await?;
        if user.role.is_admin() {
            warn!("Refused to delete admin user {}", id);
            return Err(DomainError::AdminUndeletable);
        }
        self.user_repo.delete(id).await?;
        info!("User deleted: {}", id);
        Ok(())
    }

    /// Creates the bootstrap admin account unless the username already exists.
    pub async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Ok(None);
        }
        let user = self
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role: Role::Admin,
            })
            .await?;
        info!("Default admin user created: {}", user.username);
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;
    use chrono::Utc;

    fn user(id: EntityId, username: &str, role: Role) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$2b$10$placeholder".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(user(1, name, Role::User))));
        repo.expect_create().never();
        let service = UserService::new(Arc::new(repo));

        let err = service
            .create(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
                role: Role::User,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UsernameTaken(name) if name == "alice"));
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|record| record.password_hash != "secret123" && record.email == "bob@example.com")
            .times(1)
            .returning(|record| {
                Ok(User {
                    id: 2,
                    username: record.username.clone(),
                    email: record.email.clone(),
                    password_hash: record.password_hash.clone(),
                    role: record.role,
                    created_at: Utc::now(),
                })
            });
        let service = UserService::new(Arc::new(repo));

        let created = service
            .create(NewUser {
                username: "bob".to_string(),
                email: "Bob@Example.com".to_string(),
                password: "secret123".to_string(),
                role: Role::Editor,
            })
            .await
            .unwrap();
        assert_eq!(created.role, Role::Editor);
        assert!(PasswordService::verify("secret123", &created.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_detects_email_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(user(id, "carol", Role::User))));
        repo.expect_find_by_email().returning(|_| Ok(Some(user(9, "dave", Role::User))));
        repo.expect_update().never();
        let service = UserService::new(Arc::new(repo));

        let update = UserUpdate { email: Some("dave@example.com".to_string()), ..Default::default() };
        assert!(matches!(service.update(3, update).await, Err(DomainError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_delete_refuses_admin() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(user(id, "root", Role::Admin))));
        repo.expect_delete().never();
        let service = UserService::new(Arc::new(repo));

        assert!(matches!(service.delete(1).await, Err(DomainError::AdminUndeletable)));
    }
}
