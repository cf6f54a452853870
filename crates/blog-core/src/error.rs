//! Domain errors

use blog_shared::EntityId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Navigation item {candidate_id} cannot be placed under {parent_id}: circular reference")]
    CycleDetected { candidate_id: EntityId, parent_id: EntityId },

    #[error("Parent navigation item not found: {0}")]
    ParentNotFound(EntityId),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Email already exists: {0}")]
    EmailTaken(String),

    #[error("Admin users cannot be deleted")]
    AdminUndeletable,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: EntityId) -> Self {
        DomainError::NotFound { entity, id }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
