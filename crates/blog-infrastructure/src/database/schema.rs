//! Table bootstrap for a fresh database

use sqlx::MySqlPool;
use tracing::info;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        username VARCHAR(100) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        role VARCHAR(20) NOT NULL DEFAULT 'user',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_ARTICLES: &str = r#"
    CREATE TABLE IF NOT EXISTS articles (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content LONGTEXT NOT NULL,
        summary TEXT,
        category VARCHAR(100),
        tags TEXT,
        cover VARCHAR(255),
        status VARCHAR(20) NOT NULL DEFAULT 'published',
        view_count BIGINT NOT NULL DEFAULT 0,
        author_id BIGINT,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE SET NULL
    )
"#;

const CREATE_NAVIGATION_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS navigation_items (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        path VARCHAR(255) NOT NULL,
        icon VARCHAR(50),
        order_num INT NOT NULL DEFAULT 0,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        parent_id BIGINT,
        FOREIGN KEY (parent_id) REFERENCES navigation_items(id) ON DELETE CASCADE
    )
"#;

/// Creates missing tables. `articles` references `users`, so order matters.
pub async fn bootstrap_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_USERS, CREATE_ARTICLES, CREATE_NAVIGATION_ITEMS] {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
