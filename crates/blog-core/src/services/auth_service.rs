// ============================================================================
// Blog Core - Authentication Service
// File: crates/blog-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service: login and bearer-token resolution

use std::sync::Arc;

use blog_security::{JwtService, PasswordService};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{Role, User};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Authentication service for handling login and token checks
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
    jwt: JwtService,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>, jwt_secret: &str, access_token_expiry: i64) -> Self {
        Self {
            user_repo,
            jwt: JwtService::new(jwt_secret, access_token_expiry),
        }
    }

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for user: {}", username);

        // 1. Find user by username
        let user = self.user_repo.find_by_username(username).await?.ok_or_else(|| {
            warn!("Login failed: unknown user: {}", username);
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password; an unreadable stored hash is treated as a mismatch
        let password_valid = PasswordService::verify(password, &user.password_hash).unwrap_or_else(|e| {
            warn!("Stored password hash unreadable for {}: {}", username, e);
            false
        });
        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Issue access token
        let token = self
            .jwt
            .generate_access_token(user.id, &user.username, user.role.as_str())
            .map_err(|e| DomainError::TokenError(e.to_string()))?;

        info!("Login successful for: {}", username);
        Ok(LoginResult {
            token,
            expires_in: self.jwt.access_token_expiry(),
            user: UserInfo::from(&user),
        })
    }

    /// Resolves a bearer token to the current account. Tokens of deleted
    /// users are rejected.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self
            .jwt
            .validate_token(token)
            .map_err(|e| DomainError::TokenError(e.to_string()))?;
        let user_id = claims
            .user_id()
            .map_err(|e| DomainError::TokenError(e.to_string()))?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::TokenError(format!("user {} no longer exists", user_id)))
    }
}

/// Result of successful login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub token: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

/// User info returned in auth responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: blog_shared::EntityId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
