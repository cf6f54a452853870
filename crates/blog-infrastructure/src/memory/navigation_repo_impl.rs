// ============================================================================
// Blog Infrastructure - In-memory Navigation Repository
// File: crates/blog-infrastructure/src/memory/navigation_repo_impl.rs
// ============================================================================

use async_trait::async_trait;

use blog_core::domain::{NavigationItem, NavigationItemInput};
use blog_core::error::DomainError;
use blog_core::repositories::NavigationRepository;
use blog_shared::EntityId;

use super::Collection;

pub struct MemoryNavigationRepository {
    items: Collection<NavigationItem>,
}

impl MemoryNavigationRepository {
    pub fn new() -> Self {
        Self { items: Collection::new() }
    }
}

impl Default for MemoryNavigationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NavigationRepository for MemoryNavigationRepository {
    async fn find_all(&self) -> Result<Vec<NavigationItem>, DomainError> {
        Ok(self.items.all())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<NavigationItem>, DomainError> {
        Ok(self.items.find(|item| item.id == id))
    }

    async fn create(&self, input: &NavigationItemInput) -> Result<NavigationItem, DomainError> {
        Ok(self.items.insert_with(|id| NavigationItem::from_input(id, input.clone())))
    }

    async fn update(&self, id: EntityId, input: &NavigationItemInput) -> Result<NavigationItem, DomainError> {
        self.items
            .modify(|item| item.id == id, |item| *item = NavigationItem::from_input(id, input.clone()))
            .ok_or_else(|| DomainError::not_found("Navigation item", id))
    }

    async fn delete_many(&self, ids: &[EntityId]) -> Result<u64, DomainError> {
        Ok(self.items.remove(|item| ids.contains(&item.id)) as u64)
    }
}
