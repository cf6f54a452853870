//! MySQL repository implementations

pub mod user_repo_impl;
pub mod article_repo_impl;
pub mod navigation_repo_impl;

pub use user_repo_impl::MySqlUserRepository;
pub use article_repo_impl::MySqlArticleRepository;
pub use navigation_repo_impl::MySqlNavigationRepository;

use blog_core::error::DomainError;
use tracing::error;

pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}
