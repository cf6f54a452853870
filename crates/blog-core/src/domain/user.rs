//! User domain entity

use blog_shared::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "editor" => Some(Role::Editor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }

    pub fn can_edit_content(&self) -> bool {
        matches!(self, Role::Editor | Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Account creation payload (plain-text password, hashed by the service).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 2, max = 100, message = "Username must be between 2 and 100 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,
}

/// Partial account update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 2, max = 100, message = "Username must be between 2 and 100 characters"))]
    #[serde(default)]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[serde(default)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none() && self.role.is_none()
    }
}
