//! In-memory document store adapters
//!
//! Used when `database.backend = "memory"` and as the fallback when MySQL is
//! unreachable at startup. Data lives for the lifetime of the process.

pub mod user_repo_impl;
pub mod article_repo_impl;
pub mod navigation_repo_impl;

pub use user_repo_impl::MemoryUserRepository;
pub use article_repo_impl::MemoryArticleRepository;
pub use navigation_repo_impl::MemoryNavigationRepository;

use blog_shared::EntityId;
use parking_lot::RwLock;

/// A collection of documents with auto-increment ids.
pub(crate) struct Collection<T> {
    inner: RwLock<CollectionInner<T>>,
}

struct CollectionInner<T> {
    next_id: EntityId,
    docs: Vec<T>,
}

impl<T: Clone> Collection<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(CollectionInner { next_id: 1, docs: Vec::new() }),
        }
    }

    pub(crate) fn all(&self) -> Vec<T> {
        self.inner.read().docs.clone()
    }

    pub(crate) fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.inner.read().docs.iter().find(|doc| pred(doc)).cloned()
    }

    pub(crate) fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.inner.read().docs.iter().filter(|doc| pred(doc)).count()
    }

    /// Allocates the next id and stores the document built from it.
    pub(crate) fn insert_with(&self, build: impl FnOnce(EntityId) -> T) -> T {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let doc = build(id);
        inner.docs.push(doc.clone());
        doc
    }

    /// Applies `change` to the first matching document and returns the result.
    pub(crate) fn modify(&self, pred: impl Fn(&T) -> bool, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut inner = self.inner.write();
        let doc = inner.docs.iter_mut().find(|doc| pred(doc))?;
        change(doc);
        Some(doc.clone())
    }

    /// Removes matching documents; returns how many were removed.
    pub(crate) fn remove(&self, pred: impl Fn(&T) -> bool) -> usize {
        let mut inner = self.inner.write();
        let before = inner.docs.len();
        inner.docs.retain(|doc| !pred(doc));
        before - inner.docs.len()
    }
}
