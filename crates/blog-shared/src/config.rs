//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub public_dir: String,
    pub cors_origins: Vec<String>,
}

impl AppSettings {
    pub fn is_development(&self) -> bool {
        self.env.eq_ignore_ascii_case("development")
    }
}

/// Which store backs the repositories.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Mysql,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedSettings {
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/{APP_ENV}`, then
    /// environment variables (`APP__PORT`, `JWT__SECRET`, ...).
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.name", "blog-server")?
            .set_default("app.public_dir", "public")?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("database.backend", "mysql")?
            .set_default("database.url", "mysql://root@localhost:3306/boge_blog")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("jwt.access_token_expiry", crate::constants::DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("seed.admin_username", "admin")?
            .set_default("seed.admin_email", "admin@example.com")?
            .set_default("seed.admin_password", "admin123")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("app.cors_origins")
                    .try_parsing(true),
            )
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::InvalidConfig("jwt.secret must not be empty".to_string()));
        }
        if self.jwt.access_token_expiry <= 0 {
            return Err(AppError::InvalidConfig("jwt.access_token_expiry must be positive".to_string()));
        }
        Ok(())
    }
}
