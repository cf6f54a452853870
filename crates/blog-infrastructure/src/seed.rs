// ============================================================================
// Blog Infrastructure - Seed Data
// File: crates/blog-infrastructure/src/seed.rs
// ============================================================================
//! Default content for an empty store: the admin account, the main menu and
//! a welcome article. Each part is skipped when its data already exists.

use blog_core::domain::{ArticleFilter, ArticleInput, ArticleStatus, NavigationItemInput};
use blog_core::error::DomainError;
use blog_core::services::UserService;
use blog_shared::config::SeedSettings;
use tracing::info;

use crate::Repositories;

const DEFAULT_NAVIGATION: [(&str, &str, &str); 4] = [
    ("Home", "/", "home"),
    ("Blog", "/blog", "article"),
    ("About", "/about", "info"),
    ("Contact", "/contact", "message"),
];

/// What `seed_defaults` actually wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub navigation_items: usize,
    pub articles: usize,
}

pub async fn seed_defaults(repos: &Repositories, settings: &SeedSettings) -> Result<SeedReport, DomainError> {
    let mut report = SeedReport::default();

    let users = UserService::new(repos.users.clone());
    let admin = match users
        .ensure_admin(&settings.admin_username, &settings.admin_email, &settings.admin_password)
        .await?
    {
        Some(admin) => {
            report.admin_created = true;
            Some(admin)
        }
        None => repos.users.find_by_username(&settings.admin_username).await?,
    };

    if repos.navigation.find_all().await?.is_empty() {
        for (order, (title, path, icon)) in (1..).zip(DEFAULT_NAVIGATION) {
            repos
                .navigation
                .create(&NavigationItemInput {
                    title: title.to_string(),
                    path: path.to_string(),
                    icon: Some(icon.to_string()),
                    order,
                    is_active: true,
                    parent_id: None,
                })
                .await?;
            report.navigation_items += 1;
        }
        info!("Default navigation items created: {}", report.navigation_items);
    }

    if repos.articles.count_published(&ArticleFilter::default()).await? == 0 {
        let welcome = ArticleInput {
            title: "Welcome to the blog".to_string(),
            content: "<h2>The first post</h2><p>Notes on what I learn and build will show up here.</p>"
                .to_string(),
            summary: None,
            category: Some("Announcements".to_string()),
            tags: vec!["blog".to_string(), "welcome".to_string()],
            cover: None,
            status: ArticleStatus::Published,
        };
        repos.articles.create(&welcome, admin.map(|a| a.id)).await?;
        report.articles = 1;
        info!("Welcome article created");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_shared::Pagination;

    fn settings() -> SeedSettings {
        SeedSettings {
            admin_username: "admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seed_fills_empty_store_once() {
        let repos = Repositories::memory();

        let first = seed_defaults(&repos, &settings()).await.unwrap();
        assert_eq!(first, SeedReport { admin_created: true, navigation_items: 4, articles: 1 });

        let again = seed_defaults(&repos, &settings()).await.unwrap();
        assert_eq!(again, SeedReport::default());

        let nav = repos.navigation.find_all().await.unwrap();
        assert_eq!(nav.iter().map(|i| i.order).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

        let articles = repos.articles.find_published(&ArticleFilter::default(), &Pagination::default()).await.unwrap();
        assert_eq!(articles[0].author.as_ref().map(|a| a.username.as_str()), Some("admin"));
    }
}
