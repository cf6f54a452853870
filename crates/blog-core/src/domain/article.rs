// ============================================================================
// Blog Core - Article Entity
// File: crates/blog-core/src/domain/article.rs
// ============================================================================

use blog_shared::{utils::summarize, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    #[default]
    Published,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(ArticleStatus::Draft),
            "published" => Some(ArticleStatus::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub cover: Option<String>,
    pub status: ArticleStatus,
    pub view_count: i64,
    pub author_id: Option<EntityId>,
    pub author: Option<AuthorRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// Stored summary, or a preview cut from the content.
    pub fn preview(&self) -> String {
        match self.summary.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => summarize(&self.content),
        }
    }
}

/// List entry for the public article index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: EntityId,
    pub title: String,
    pub summary: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub cover: Option<String>,
    pub status: ArticleStatus,
    pub view_count: i64,
    pub author: Option<AuthorRef>,
    pub created_at: DateTime<Utc>,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            summary: article.preview(),
            category: article.category.clone(),
            tags: article.tags.clone(),
            cover: article.cover.clone(),
            status: article.status,
            view_count: article.view_count,
            author: article.author.clone(),
            created_at: article.created_at,
        }
    }
}

/// Optional narrowing of the public article index. Blank values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact category name.
    pub category: Option<String>,
    /// Exact tag; the article must carry it.
    pub tag: Option<String>,
    /// Case-insensitive text looked up in title, summary and content.
    pub search: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ArticleFilter {
    pub fn new(category: Option<String>, tag: Option<String>, search: Option<String>) -> Self {
        Self {
            category: non_blank(category),
            tag: non_blank(tag),
            search: non_blank(search),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.tag.is_none() && self.search.is_none()
    }

    /// Filter predicate for stores that cannot push it down to a query.
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(category) = &self.category {
            if article.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !article.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let found = [Some(article.title.as_str()), article.summary.as_deref(), Some(article.content.as_str())]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
        true
    }
}

/// Create/update payload for an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub summary: Option<String>,

    #[validate(length(max = 100, message = "Category too long"))]
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(length(max = 255, message = "Cover URL too long"))]
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub status: ArticleStatus,
}

impl ArticleInput {
    /// Trims the title and drops blank tags.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(content: &str, summary: Option<&str>) -> Article {
        Article {
            id: 1,
            title: "Hello".to_string(),
            content: content.to_string(),
            summary: summary.map(str::to_string),
            category: None,
            tags: vec![],
            cover: None,
            status: ArticleStatus::Published,
            view_count: 0,
            author_id: None,
            author: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_preview_prefers_summary() {
        assert_eq!(article("body", Some("short")).preview(), "short");
        assert_eq!(article("body", Some("  ")).preview(), "body...");
        assert_eq!(article("body", None).preview(), "body...");
    }

    #[test]
    fn test_filter_matches_category_tag_and_search() {
        let mut post = article("Rust ownership explained", Some("Borrowing basics"));
        post.category = Some("tech".to_string());
        post.tags = vec!["rust".to_string(), "memory".to_string()];

        assert!(ArticleFilter::default().matches(&post));
        assert!(ArticleFilter::new(Some("tech".into()), Some("rust".into()), Some("OWNERSHIP".into())).matches(&post));
        assert!(ArticleFilter::new(None, None, Some("borrowing".into())).matches(&post));
        assert!(ArticleFilter::new(None, None, Some("hello".into())).matches(&post));
        assert!(!ArticleFilter::new(Some("life".into()), None, None).matches(&post));
        assert!(!ArticleFilter::new(None, Some("go".into()), None).matches(&post));
        assert!(!ArticleFilter::new(None, None, Some("python".into())).matches(&post));
    }

    #[test]
    fn test_filter_drops_blank_values() {
        let filter = ArticleFilter::new(Some("  ".into()), Some("".into()), Some(" rust ".into()));
        assert_eq!(filter.category, None);
        assert_eq!(filter.tag, None);
        assert_eq!(filter.search.as_deref(), Some("rust"));
        assert!(!filter.is_empty());
        assert!(ArticleFilter::new(None, None, None).is_empty());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(ArticleStatus::from_str("Published"), Some(ArticleStatus::Published));
        assert_eq!(ArticleStatus::from_str("draft"), Some(ArticleStatus::Draft));
        assert_eq!(ArticleStatus::from_str("archived"), None);
    }

    #[test]
    fn test_input_defaults_to_published() {
        let input: ArticleInput =
            serde_json::from_str(r#"{"title":" Hi ","content":"x","tags":["a"," ",""]}"#).unwrap();
        let input = input.normalized();
        assert_eq!(input.status, ArticleStatus::Published);
        assert_eq!(input.title, "Hi");
        assert_eq!(input.tags, vec!["a".to_string()]);
    }
}
