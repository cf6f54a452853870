//! Request DTOs and extractors

pub mod auth;
pub mod article;
pub mod json;
pub mod query;

pub use auth::LoginRequest;
pub use article::ArticleListQuery;
pub use json::JsonBody;
pub use query::QueryParams;
