//! # Blog Core - Domain Module
//! 
//! Domain entities for the blog backend.

pub mod navigation;
pub mod navigation_tree;
pub mod article;
pub mod user;

// Re-export all entities and enums
pub use navigation::{NavigationItem, NavigationItemInput};
pub use navigation_tree::{build_tree, descendant_ids, would_create_cycle, NavigationNode};
pub use article::{Article, ArticleFilter, ArticleInput, ArticleStatus, ArticleSummary, AuthorRef};
pub use user::{NewUser, Role, User, UserUpdate};
