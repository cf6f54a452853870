// ============================================================================
// Blog Core - Navigation Item Entity
// File: crates/blog-core/src/domain/navigation.rs
// Description: Navigation menu entry (adjacency-list record)
// ============================================================================

use blog_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Persisted navigation record. `parent_id` links items into a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: EntityId,
    pub title: String,
    pub path: String,
    pub icon: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub parent_id: Option<EntityId>,
}

/// Create/update payload for a navigation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItemInput {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 255, message = "Path must be between 1 and 255 characters"))]
    pub path: String,

    #[validate(length(max = 50, message = "Icon name too long"))]
    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default, alias = "orderNum")]
    pub order: i32,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub parent_id: Option<EntityId>,
}

fn default_active() -> bool {
    true
}

impl NavigationItemInput {
    /// Trims text fields; an empty icon becomes `None`.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.path = self.path.trim().to_string();
        self.icon = self
            .icon
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());
        self
    }
}

impl NavigationItem {
    pub fn from_input(id: EntityId, input: NavigationItemInput) -> Self {
        Self {
            id,
            title: input.title,
            path: input.path,
            icon: input.icon,
            order: input.order,
            is_active: input.is_active,
            parent_id: input.parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults_from_json() {
        let input: NavigationItemInput =
            serde_json::from_str(r#"{"title":"Blog","path":"/blog","orderNum":2}"#).unwrap();
        assert_eq!(input.order, 2);
        assert!(input.is_active);
        assert_eq!(input.parent_id, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_input_rejects_empty_title() {
        let input = NavigationItemInput {
            title: String::new(),
            path: "/".to_string(),
            icon: None,
            order: 0,
            is_active: true,
            parent_id: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_normalized_drops_blank_icon() {
        let input = NavigationItemInput {
            title: "  Home ".to_string(),
            path: " / ".to_string(),
            icon: Some("   ".to_string()),
            order: 1,
            is_active: true,
            parent_id: None,
        }
        .normalized();
        assert_eq!(input.title, "Home");
        assert_eq!(input.path, "/");
        assert_eq!(input.icon, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let item = NavigationItem {
            id: 1,
            title: "Home".to_string(),
            path: "/".to_string(),
            icon: Some("home".to_string()),
            order: 1,
            is_active: true,
            parent_id: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isActive"], true);
        assert!(json["parentId"].is_null());
        assert!(item.is_root());
    }
}
