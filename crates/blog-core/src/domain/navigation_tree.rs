// ============================================================================
// Blog Core - Navigation Tree
// File: crates/blog-core/src/domain/navigation_tree.rs
// Description: Forest construction and parent-cycle checks for navigation items
// ============================================================================
//! Turns the flat navigation adjacency list into an ordered forest.
//!
//! [`build_tree`] is the read path and carries no cycle guard of its own;
//! stored data is kept acyclic by running [`would_create_cycle`] before every
//! write that sets a parent.

use std::collections::{HashMap, HashSet, VecDeque};

use blog_shared::EntityId;
use serde::Serialize;

use super::navigation::NavigationItem;

/// A navigation item with its ordered children. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    pub id: EntityId,
    pub title: String,
    pub path: String,
    pub icon: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    fn with_children(item: &NavigationItem, children: Vec<NavigationNode>) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            path: item.path.clone(),
            icon: item.icon.clone(),
            order: item.order,
            is_active: item.is_active,
            children,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(NavigationNode::size).sum::<usize>()
    }

    /// Drops inactive nodes together with everything below them.
    pub fn retain_active(forest: Vec<NavigationNode>) -> Vec<NavigationNode> {
        forest
            .into_iter()
            .filter(|node| node.is_active)
            .map(|mut node| {
                node.children = Self::retain_active(std::mem::take(&mut node.children));
                node
            })
            .collect()
    }
}

type ChildIndex<'a> = HashMap<Option<EntityId>, Vec<&'a NavigationItem>>;

fn sort_siblings(siblings: &mut [&NavigationItem]) {
    siblings.sort_by_key(|item| (item.order, item.id));
}

fn attach(index: &ChildIndex<'_>, parent_id: Option<EntityId>) -> Vec<NavigationNode> {
    index
        .get(&parent_id)
        .map(|siblings| {
            siblings
                .iter()
                .map(|item| NavigationNode::with_children(item, attach(index, Some(item.id))))
                .collect()
        })
        .unwrap_or_default()
}

/// Builds the forest below `parent_id`, siblings sorted by `(order, id)`.
///
/// At the root level (`parent_id == None`) items whose parent id is not
/// present in `items` are treated as roots. Below the root level only exact
/// parent matches are returned.
pub fn build_tree(items: &[NavigationItem], parent_id: Option<EntityId>) -> Vec<NavigationNode> {
    let mut index: ChildIndex<'_> = HashMap::new();
    for item in items {
        index.entry(item.parent_id).or_default().push(item);
    }
    for siblings in index.values_mut() {
        sort_siblings(siblings);
    }

    if parent_id.is_some() {
        return attach(&index, parent_id);
    }

    let known: HashSet<EntityId> = items.iter().map(|item| item.id).collect();
    let mut roots: Vec<&NavigationItem> = items
        .iter()
        .filter(|item| item.parent_id.map_or(true, |p| !known.contains(&p)))
        .collect();
    sort_siblings(&mut roots);

    roots
        .into_iter()
        .map(|item| NavigationNode::with_children(item, attach(&index, Some(item.id))))
        .collect()
}

/// True when making `proposed_parent_id` the parent of `candidate_id` would
/// close a loop, i.e. the proposed parent is the candidate or one of its
/// descendants.
pub fn would_create_cycle(
    items: &[NavigationItem],
    candidate_id: EntityId,
    proposed_parent_id: EntityId,
) -> bool {
    if proposed_parent_id == candidate_id {
        return true;
    }

    let parents: HashMap<EntityId, Option<EntityId>> =
        items.iter().map(|item| (item.id, item.parent_id)).collect();

    let mut seen = HashSet::new();
    let mut current = Some(proposed_parent_id);
    while let Some(id) = current {
        if id == candidate_id {
            return true;
        }
        // an existing loop that never reaches the candidate
        if !seen.insert(id) {
            return false;
        }
        current = parents.get(&id).copied().flatten();
    }
    false
}

/// `root_id` followed by all of its transitive children, breadth first.
pub fn descendant_ids(items: &[NavigationItem], root_id: EntityId) -> Vec<EntityId> {
    let mut children: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
    for item in items {
        if let Some(parent) = item.parent_id {
            children.entry(parent).or_default().push(item.id);
        }
    }

    let mut seen = HashSet::from([root_id]);
    let mut ordered = vec![root_id];
    let mut queue = VecDeque::from([root_id]);
    while let Some(id) = queue.pop_front() {
        for child in children.get(&id).into_iter().flatten() {
            if seen.insert(*child) {
                ordered.push(*child);
                queue.push_back(*child);
            }
        }
    }
    ordered
}
