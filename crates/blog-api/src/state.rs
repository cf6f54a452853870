use std::sync::Arc;

use blog_core::repositories::{ArticleRepository, NavigationRepository, UserRepository};
use blog_core::services::{ArticleService, AuthService, NavigationService, UserService};
use blog_shared::config::JwtSettings;

/// Services shared by every handler. Repositories are trait objects so the
/// same router runs on MySQL or on the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub users: Arc<UserService<dyn UserRepository>>,
    pub articles: Arc<ArticleService<dyn ArticleRepository>>,
    pub navigation: Arc<NavigationService<dyn NavigationRepository>>,
    /// True when serving from the in-memory fallback store.
    pub mock_data: bool,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        articles: Arc<dyn ArticleRepository>,
        navigation: Arc<dyn NavigationRepository>,
        jwt: &JwtSettings,
        mock_data: bool,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users.clone(), &jwt.secret, jwt.access_token_expiry)),
            users: Arc::new(UserService::new(users)),
            articles: Arc::new(ArticleService::new(articles)),
            navigation: Arc::new(NavigationService::new(navigation)),
            mock_data,
        }
    }
}
