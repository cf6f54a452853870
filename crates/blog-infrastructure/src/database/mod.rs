//! Database module (MySQL/MariaDB adapters)

pub mod connection;
pub mod schema;
pub mod mysql;

pub use connection::create_pool;
pub use schema::bootstrap_schema;
pub use mysql::{MySqlArticleRepository, MySqlNavigationRepository, MySqlUserRepository};
