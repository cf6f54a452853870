//! Domain services (business logic)

pub mod auth_service;
pub mod user_service;
pub mod article_service;
pub mod navigation_service;

pub use auth_service::{AuthService, LoginResult, UserInfo};
pub use user_service::UserService;
pub use article_service::{ArticlePage, ArticleService};
pub use navigation_service::NavigationService;
