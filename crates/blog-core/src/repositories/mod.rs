//! Repository traits (ports)

pub mod navigation_repository;
pub mod article_repository;
pub mod user_repository;

pub use navigation_repository::NavigationRepository;
pub use article_repository::ArticleRepository;
pub use user_repository::{UserRecord, UserRepository};

#[cfg(test)]
pub use navigation_repository::MockNavigationRepository;
#[cfg(test)]
pub use article_repository::MockArticleRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
