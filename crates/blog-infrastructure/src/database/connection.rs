//! Database connection pool

use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::time::Duration;

use blog_shared::config::DatabaseSettings;

pub async fn create_pool(settings: &DatabaseSettings) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(&settings.url)
        .await
}
