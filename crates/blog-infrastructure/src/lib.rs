//! # Blog Infrastructure
//! 
//! Storage adapters for the repository ports: MySQL/MariaDB through sqlx and
//! an in-memory document store, plus schema bootstrap and seed data.

use std::sync::Arc;

use blog_core::repositories::{ArticleRepository, NavigationRepository, UserRepository};
use sqlx::MySqlPool;

pub mod database;
pub mod memory;
pub mod seed;

pub use database::{
    bootstrap_schema, create_pool, MySqlArticleRepository, MySqlNavigationRepository,
    MySqlUserRepository,
};
pub use memory::{MemoryArticleRepository, MemoryNavigationRepository, MemoryUserRepository};
pub use seed::{seed_defaults, SeedReport};

/// The three repository ports behind one storage backend.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub navigation: Arc<dyn NavigationRepository>,
}

impl Repositories {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            articles: Arc::new(MySqlArticleRepository::new(pool.clone())),
            navigation: Arc::new(MySqlNavigationRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        let users = Arc::new(MemoryUserRepository::new());
        Self {
            articles: Arc::new(MemoryArticleRepository::with_users(users.clone())),
            users,
            navigation: Arc::new(MemoryNavigationRepository::new()),
        }
    }
}
