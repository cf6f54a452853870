// ============================================================================
// Blog Core - Navigation Service
// File: crates/blog-core/src/services/navigation_service.rs
// ============================================================================
//! Navigation menu reads (tree and flat) and cycle-checked mutations

use std::sync::Arc;

use blog_shared::EntityId;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{
    build_tree, descendant_ids, would_create_cycle, NavigationItem, NavigationItemInput,
    NavigationNode,
};
use crate::error::DomainError;
use crate::repositories::NavigationRepository;

const ENTITY: &str = "Navigation item";

/// Mutations run one at a time so a parent check always sees the writes of
/// the mutation before it.
pub struct NavigationService<R: NavigationRepository + ?Sized> {
    repo: Arc<R>,
    writes: Mutex<()>,
}

impl<R: NavigationRepository + ?Sized> NavigationService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, writes: Mutex::new(()) }
    }

    /// Public menu: the forest of active items. An inactive item hides its
    /// whole subtree.
    pub async fn active_tree(&self) -> Result<Vec<NavigationNode>, DomainError> {
        let items = self.repo.find_all().await?;
        Ok(NavigationNode::retain_active(build_tree(&items, None)))
    }

    /// Every item, flat, sorted by `(order, id)`. Used by the admin screen.
    pub async fn list_all(&self) -> Result<Vec<NavigationItem>, DomainError> {
        let mut items = self.repo.find_all().await?;
        items.sort_by_key(|item| (item.order, item.id));
        Ok(items)
    }

    pub async fn get(&self, id: EntityId) -> Result<NavigationItem, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn create(&self, input: NavigationItemInput) -> Result<NavigationItem, DomainError> {
        let input = input.normalized();
        input.validate()?;

        let _guard = self.writes.lock().await;
        if let Some(parent_id) = input.parent_id {
            let items = self.repo.find_all().await?;
            ensure_parent_exists(&items, parent_id)?;
        }

        let item = self.repo.create(&input).await?;
        info!("Navigation item created: {} ({})", item.id, item.path);
        Ok(item)
    }

    /// Rejects the update before any write when the new parent is missing or
    /// would make the item its own ancestor.
    pub async fn update(
        &self,
        id: EntityId,
        input: NavigationItemInput,
    ) -> Result<NavigationItem, DomainError> {
        let input = input.normalized();
        input.validate()?;

        let _guard = self.writes.lock().await;
        let items = self.repo.find_all().await?;
        if !items.iter().any(|item| item.id == id) {
            return Err(DomainError::not_found(ENTITY, id));
        }

        if let Some(parent_id) = input.parent_id {
            if would_create_cycle(&items, id, parent_id) {
                warn!("Rejected navigation update: {} under {} forms a cycle", id, parent_id);
                return Err(DomainError::CycleDetected { candidate_id: id, parent_id });
            }
            ensure_parent_exists(&items, parent_id)?;
        }

        let item = self.repo.update(id, &input).await?;
        info!("Navigation item updated: {}", id);
        Ok(item)
    }

    /// Deletes the item and all of its descendants. Returns the removed ids.
    pub async fn delete(&self, id: EntityId) -> Result<Vec<EntityId>, DomainError> {
        let _guard = self.writes.lock().await;
        let items = self.repo.find_all().await?;
        if !items.iter().any(|item| item.id == id) {
            return Err(DomainError::not_found(ENTITY, id));
        }

        let ids = descendant_ids(&items, id);
        let removed = self.repo.delete_many(&ids).await?;
        info!("Navigation item {} deleted with {} descendant(s)", id, removed.saturating_sub(1));
        Ok(ids)
    }
}

fn ensure_parent_exists(items: &[NavigationItem], parent_id: EntityId) -> Result<(), DomainError> {
    if items.iter().any(|item| item.id == parent_id) {
        Ok(())
    } else {
        Err(DomainError::ParentNotFound(parent_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockNavigationRepository;
    use async_trait::async_trait;

    fn item(id: EntityId, parent_id: Option<EntityId>, order: i32, is_active: bool) -> NavigationItem {
        NavigationItem {
            id,
            title: format!("Item {}", id),
            path: format!("/item-{}", id),
            icon: None,
            order,
            is_active,
            parent_id,
        }
    }

    fn input(parent_id: Option<EntityId>) -> NavigationItemInput {
        NavigationItemInput {
            title: "Docs".to_string(),
            path: "/docs".to_string(),
            icon: None,
            order: 0,
            is_active: true,
            parent_id,
        }
    }

    fn chain() -> Vec<NavigationItem> {
        vec![item(1, None, 0, true), item(2, Some(1), 0, true), item(3, Some(2), 0, true)]
    }

    fn service_with(items: Vec<NavigationItem>, mut repo: MockNavigationRepository) -> NavigationService<MockNavigationRepository> {
        repo.expect_find_all().returning(move || Ok(items.clone()));
        NavigationService::new(Arc::new(repo))
    }

    /// Shared store that yields inside every read and write, so concurrent
    /// mutations interleave unless the service serializes them.
    struct YieldingRepo {
        items: std::sync::Mutex<Vec<NavigationItem>>,
    }

    impl YieldingRepo {
        fn snapshot(&self) -> Vec<NavigationItem> {
            self.items.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NavigationRepository for YieldingRepo {
        async fn find_all(&self) -> Result<Vec<NavigationItem>, DomainError> {
            let items = self.snapshot();
            tokio::task::yield_now().await;
            Ok(items)
        }

        async fn find_by_id(&self, id: EntityId) -> Result<Option<NavigationItem>, DomainError> {
            Ok(self.snapshot().into_iter().find(|item| item.id == id))
        }

        async fn create(&self, _input: &NavigationItemInput) -> Result<NavigationItem, DomainError> {
            unreachable!("not used by these tests")
        }

        async fn update(&self, id: EntityId, input: &NavigationItemInput) -> Result<NavigationItem, DomainError> {
            tokio::task::yield_now().await;
            let updated = NavigationItem::from_input(id, input.clone());
            let mut items = self.items.lock().unwrap();
            for item in items.iter_mut().filter(|item| item.id == id) {
                *item = updated.clone();
            }
            Ok(updated)
        }

        async fn delete_many(&self, _ids: &[EntityId]) -> Result<u64, DomainError> {
            unreachable!("not used by these tests")
        }
    }

    #[tokio::test]
    async fn test_concurrent_reparenting_cannot_form_cycle() {
        let repo = Arc::new(YieldingRepo {
            items: std::sync::Mutex::new(vec![item(1, None, 0, true), item(2, None, 1, true)]),
        });
        let service = NavigationService::new(repo.clone());

        let (first, second) = tokio::join!(service.update(1, input(Some(2))), service.update(2, input(Some(1))));
        assert!(first.is_ok());
        assert!(matches!(second, Err(DomainError::CycleDetected { candidate_id: 2, parent_id: 1 })));

        let forest = build_tree(&repo.snapshot(), None);
        assert_eq!(forest.iter().map(NavigationNode::size).sum::<usize>(), 2);
    }

    #[tokio::test]
    async fn test_update_rejects_cycle_without_writing() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_update().never();
        let service = service_with(chain(), repo);

        let err = service.update(1, input(Some(3))).await.unwrap_err();
        assert!(matches!(err, DomainError::CycleDetected { candidate_id: 1, parent_id: 3 }));
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_update().never();
        let service = service_with(chain(), repo);

        let err = service.update(2, input(Some(2))).await.unwrap_err();
        assert!(matches!(err, DomainError::CycleDetected { .. }));
    }

    #[tokio::test]
    async fn test_update_moves_item_under_valid_parent() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_update()
            .withf(|id, input| *id == 3 && input.parent_id == Some(1))
            .times(1)
            .returning(|id, input| Ok(NavigationItem::from_input(id, input.clone())));
        let service = service_with(chain(), repo);

        let updated = service.update(3, input(Some(1))).await.unwrap();
        assert_eq!(updated.parent_id, Some(1));
    }

    #[tokio::test]
    async fn test_update_missing_item() {
        let service = service_with(chain(), MockNavigationRepository::new());
        let err = service.update(42, input(None)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn test_create_requires_existing_parent() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_create().never();
        let service = service_with(chain(), repo);

        let err = service.create(input(Some(99))).await.unwrap_err();
        assert!(matches!(err, DomainError::ParentNotFound(99)));
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_create().never();
        let service = NavigationService::new(Arc::new(repo));

        let mut bad = input(None);
        bad.title = "   ".to_string();
        let err = service.create(bad).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_descendants() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_delete_many()
            .withf(|ids| ids == [2, 3])
            .times(1)
            .returning(|ids| Ok(ids.len() as u64));
        let service = service_with(chain(), repo);

        assert_eq!(service.delete(2).await.unwrap(), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_active_tree_hides_inactive_subtrees() {
        let items = vec![
            item(1, None, 1, true),
            item(2, None, 0, false),
            item(3, Some(2), 0, true),
            item(4, Some(1), 0, true),
        ];
        let service = service_with(items, MockNavigationRepository::new());

        let tree = service.active_tree().await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert_eq!(tree[0].children[0].id, 4);
    }

    #[tokio::test]
    async fn test_list_all_sorted() {
        let items = vec![item(3, None, 2, false), item(1, None, 2, true), item(2, Some(1), 0, true)];
        let service = service_with(items, MockNavigationRepository::new());

        let ids: Vec<_> = service.list_all().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
