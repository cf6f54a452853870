//! Navigation repository trait (port)

use async_trait::async_trait;
use blog_shared::EntityId;

use crate::domain::{NavigationItem, NavigationItemInput};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NavigationRepository: Send + Sync {
    /// Every item, active or not, in no particular order.
    async fn find_all(&self) -> Result<Vec<NavigationItem>, DomainError>;
    async fn find_by_id(&self, id: EntityId) -> Result<Option<NavigationItem>, DomainError>;
    async fn create(&self, input: &NavigationItemInput) -> Result<NavigationItem, DomainError>;
    async fn update(&self, id: EntityId, input: &NavigationItemInput) -> Result<NavigationItem, DomainError>;
    /// Removes all given ids in one operation; returns the number removed.
    async fn delete_many(&self, ids: &[EntityId]) -> Result<u64, DomainError>;
}
