//! Pure, stateless algorithms over an already-fetched snapshot: the parent
//! status derivation rule, the two "next actionable item" walks, and the
//! dependency cycle detector. Nothing here talks to storage — the Manager
//! assembles the snapshot (via the gateway) and hands it in.

use std::collections::{HashMap, HashSet};

use crate::domain::{Dependency, Item, ItemStatus};

/// A parent's status is computed from its children, never set directly.
/// Completed wins when every child is completed; an in-progress child, or
/// a split between completed and not, means the parent is in progress;
/// a failed child with nothing in progress and not all completed means
/// failed; otherwise the parent stays pending. Called with an empty slice
/// only when the caller wants a reset (e.g. the last child was removed).
pub fn derive_parent_status(children: &[ItemStatus]) -> ItemStatus {
    if children.is_empty() {
        return ItemStatus::Pending;
    }
    let total = children.len();
    let completed = children.iter().filter(|s| **s == ItemStatus::Completed).count();
    let in_progress = children.iter().any(|s| *s == ItemStatus::InProgress);
    let failed = children.iter().any(|s| *s == ItemStatus::Failed);

    if completed == total {
        return ItemStatus::Completed;
    }
    if in_progress || (completed > 0 && completed < total) {
        return ItemStatus::InProgress;
    }
    if failed {
        return ItemStatus::Failed;
    }
    ItemStatus::Pending
}

/// Every item in pre-order (root, its children immediately, next root,
/// ...) sorted by sibling position — the ordering contract shared by
/// `get_list_items` and `get_all_items_properties`.
pub fn hierarchical_order(items: &[Item]) -> Vec<&Item> {
    let children_of = children_by_parent(items);
    let roots = children_of.get(&None).cloned().unwrap_or_default();
    let mut order = Vec::new();
    for root in &roots {
        preorder(root, &children_of, &mut order);
    }
    order
}

/// Linear scan over `items` in position order, returning the first
/// pending, unblocked candidate. Callers pass the level they care about
/// (typically root items) already sorted or not — position is re-sorted
/// here; positions are only comparable within one sibling group.
pub fn next_pending_flat<'a>(items: &'a [Item], is_blocked: &impl Fn(i32) -> bool) -> Option<&'a Item> {
    let mut candidates: Vec<&Item> = items.iter().collect();
    candidates.sort_by_key(|item| item.position);
    candidates
        .into_iter()
        .find(|item| item.status == ItemStatus::Pending && !is_blocked(item.id))
}

fn children_by_parent(items: &[Item]) -> HashMap<Option<i32>, Vec<&Item>> {
    let mut groups: HashMap<Option<i32>, Vec<&Item>> = HashMap::new();
    for item in items {
        groups.entry(item.parent_item_id).or_default().push(item);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|item| item.position);
    }
    groups
}

fn preorder<'a>(
    item: &'a Item,
    children_of: &HashMap<Option<i32>, Vec<&'a Item>>,
    out: &mut Vec<&'a Item>,
) {
    out.push(item);
    if let Some(kids) = children_of.get(&Some(item.id)) {
        for kid in kids {
            preorder(kid, children_of, out);
        }
    }
}

/// Hierarchy-aware "next pending": pre-order DFS over root items in
/// position order. If any item in the whole snapshot is `in_progress`,
/// its subtree is prioritized — the search is narrowed to that subtree's
/// leaves before falling back to a plain whole-tree scan. Blocked leaves
/// are skipped in place; the walk never stops early on them.
pub fn next_pending_hierarchical<'a>(
    items: &'a [Item],
    is_blocked: &impl Fn(i32) -> bool,
) -> Option<&'a Item> {
    let children_of = children_by_parent(items);
    let is_leaf = |item: &Item| !children_of.contains_key(&Some(item.id));

    let roots = children_of.get(&None).cloned().unwrap_or_default();
    let mut order = Vec::new();
    for root in &roots {
        preorder(root, &children_of, &mut order);
    }

    if let Some(&active) = order.iter().find(|item| item.status == ItemStatus::InProgress) {
        let mut subtree = Vec::new();
        preorder(active, &children_of, &mut subtree);
        if let Some(found) = subtree
            .into_iter()
            .filter(|item| is_leaf(item))
            .find(|item| item.status == ItemStatus::Pending && !is_blocked(item.id))
        {
            return Some(found);
        }
    }

    order
        .into_iter()
        .filter(|item| is_leaf(item))
        .find(|item| item.status == ItemStatus::Pending && !is_blocked(item.id))
}

/// Whether `dependent` can currently start: pending and unblocked.
pub fn can_start(status: ItemStatus, blocked: bool) -> bool {
    status == ItemStatus::Pending && !blocked
}

/// Whether an item can be marked completed: no pending/in-progress
/// children and no unmet blocker.
pub fn can_complete(children: &[ItemStatus], blocked: bool) -> bool {
    if blocked {
        return false;
    }
    !children
        .iter()
        .any(|status| matches!(status, ItemStatus::Pending | ItemStatus::InProgress))
}

/// DFS from `new_required`, following "requires" edges (an item's
/// outgoing edge points at what it requires). If `new_dependent` is
/// reachable, `new_required` already (transitively) depends on it, so
/// adding `new_dependent -> new_required` would close a cycle.
pub fn would_create_cycle(edges: &[Dependency], new_dependent: i32, new_required: i32) -> bool {
    if new_dependent == new_required {
        return true;
    }
    let mut adjacency: HashMap<i32, Vec<i32>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.dependent_item_id)
            .or_default()
            .push(edge.required_item_id);
    }

    let mut visited = HashSet::new();
    let mut stack = vec![new_required];
    while let Some(node) = stack.pop() {
        if node == new_dependent {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(neighbors) = adjacency.get(&node) {
            stack.extend(neighbors.iter().copied());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, parent: Option<i32>, position: i32, status: ItemStatus) -> Item {
        Item {
            id,
            list_id: 1,
            parent_item_id: parent,
            item_key: crate::domain::ItemKey::new(format!("k{id}")).unwrap(),
            content: String::new(),
            status,
            position,
            completion_states: Default::default(),
            started_at: None,
            completed_at: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn derive_all_completed() {
        let statuses = vec![ItemStatus::Completed, ItemStatus::Completed];
        assert_eq!(derive_parent_status(&statuses), ItemStatus::Completed);
    }

    #[test]
    fn derive_mixed_completed_is_in_progress() {
        let statuses = vec![ItemStatus::Completed, ItemStatus::Pending];
        assert_eq!(derive_parent_status(&statuses), ItemStatus::InProgress);
    }

    #[test]
    fn derive_failed_without_in_progress() {
        let statuses = vec![ItemStatus::Failed, ItemStatus::Pending];
        assert_eq!(derive_parent_status(&statuses), ItemStatus::Failed);
    }

    #[test]
    fn derive_empty_resets_to_pending() {
        assert_eq!(derive_parent_status(&[]), ItemStatus::Pending);
    }

    #[test]
    fn hierarchical_prioritizes_in_progress_subtree() {
        let items = vec![
            item(1, None, 1, ItemStatus::InProgress),
            item(2, Some(1), 1, ItemStatus::Pending),
            item(3, None, 2, ItemStatus::Pending),
        ];
        let found = next_pending_hierarchical(&items, &|_| false).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn hierarchical_falls_back_when_no_in_progress() {
        let items = vec![item(1, None, 1, ItemStatus::Pending), item(2, None, 2, ItemStatus::Pending)];
        let found = next_pending_hierarchical(&items, &|_| false).unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn cycle_detected_transitively() {
        let edges = vec![
            Dependency { dependent_item_id: 1, required_item_id: 2 },
            Dependency { dependent_item_id: 2, required_item_id: 3 },
        ];
        assert!(would_create_cycle(&edges, 3, 1));
        assert!(!would_create_cycle(&edges, 3, 4));
    }
}
