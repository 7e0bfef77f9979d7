use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::domain::{HistoryAction, HistoryEntityType, Item, ItemStatus};
use crate::error::{ManagerError, Result};
use crate::gateway;
use crate::traversal;

use super::Manager;

/// A materialized subtree, used by `get_item_hierarchy`.
#[derive(Debug, Clone)]
pub struct ItemHierarchy {
    pub item: Item,
    pub children: Vec<ItemHierarchy>,
}

impl Manager {
    /// Resolves `(list, key, parent_key)` the way every item accessor
    /// does: a missing `parent_key` looks among root items only, so a
    /// subitem is invisible unless its parent is named explicitly.
    pub(super) async fn resolve_item<C: ConnectionTrait>(
        &self,
        conn: &C,
        list_id: i32,
        key: &str,
        parent_key: Option<&str>,
    ) -> Result<Item> {
        match parent_key {
            None => gateway::items::find_by_key_and_parent(conn, list_id, None, key)
                .await?
                .ok_or_else(|| ManagerError::NotFound { entity: "item", key: key.to_string() }),
            Some(pk) => {
                let parent = gateway::items::find_unique_by_key(conn, list_id, pk)
                    .await?
                    .ok_or_else(|| ManagerError::NotFound { entity: "item", key: pk.to_string() })?;
                gateway::items::find_by_key_and_parent(conn, list_id, Some(parent.id), key)
                    .await?
                    .ok_or_else(|| ManagerError::NotFoundUnderParent {
                        key: key.to_string(),
                        parent_key: pk.to_string(),
                    })
            }
        }
    }

    /// Walks from `item_id` up to the root, recomputing each ancestor's
    /// derived status from its children and stopping as soon as a level
    /// is unchanged (the fixed point has been reached for everything
    /// above it too, since nothing above this level has been touched).
    pub(super) async fn recompute_ancestor_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        item_id: i32,
    ) -> Result<()> {
        let mut current_id = Some(item_id);
        while let Some(id) = current_id {
            let item = match gateway::items::find_by_id(conn, id).await? {
                Some(item) => item,
                None => break,
            };
            let children = gateway::items::find_children(conn, item.list_id, Some(id)).await?;
            if children.is_empty() {
                current_id = item.parent_item_id;
                continue;
            }

            let child_statuses: Vec<ItemStatus> = children.iter().map(|child| child.status).collect();
            let derived = traversal::derive_parent_status(&child_statuses);

            if derived != item.status {
                let now = Utc::now().naive_utc();
                let started_at = match derived {
                    ItemStatus::Pending => None,
                    _ => item.started_at.or(Some(now)),
                };
                let completed_at = if derived == ItemStatus::Completed { Some(now) } else { None };

                gateway::items::update_status(conn, item.id, derived, started_at, completed_at).await?;

                let action =
                    if derived == ItemStatus::Completed { HistoryAction::AutoCompleted } else { HistoryAction::StatusUpdated };
                gateway::history::append(
                    conn,
                    HistoryEntityType::Item,
                    item.id,
                    action,
                    Some(item.status.as_str().to_string()),
                    Some(derived.as_str().to_string()),
                    None,
                )
                .await?;
            } else {
                break;
            }

            current_id = item.parent_item_id;
        }
        Ok(())
    }

    async fn insert_item(
        &self,
        list: &str,
        parent_key: Option<&str>,
        key: &str,
        content: &str,
        position: Option<i32>,
    ) -> Result<Item> {
        if let Some(position) = position {
            crate::domain::validation::validate_position(position)?;
        }

        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;

        let parent_id = match parent_key {
            None => None,
            Some(pk) => Some(
                gateway::items::find_unique_by_key(&txn, list_row.id, pk)
                    .await?
                    .ok_or_else(|| ManagerError::NotFound { entity: "item", key: pk.to_string() })?
                    .id,
            ),
        };

        if gateway::items::find_by_key_and_parent(&txn, list_row.id, parent_id, key)
            .await?
            .is_some()
        {
            return Err(ManagerError::AlreadyExists { entity: "item", key: key.to_string() });
        }

        let position = match position {
            Some(position) => position,
            None => gateway::items::next_position(&txn, list_row.id, parent_id).await?,
        };

        let item = gateway::items::insert(&txn, list_row.id, parent_id, key, content, position).await?;

        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            if parent_id.is_some() { HistoryAction::SubitemCreated } else { HistoryAction::Created },
            None,
            Some(item.content.clone()),
            None,
        )
        .await?;

        if let Some(parent_id) = parent_id {
            self.recompute_ancestor_status(&txn, parent_id).await?;
        }

        txn.commit().await?;
        Ok(item)
    }

    pub async fn add_item(&self, list: &str, key: &str, content: &str, position: Option<i32>) -> Result<Item> {
        self.insert_item(list, None, key, content, position).await
    }

    pub async fn add_subitem(
        &self,
        list: &str,
        parent_key: &str,
        key: &str,
        content: &str,
        position: Option<i32>,
    ) -> Result<Item> {
        self.insert_item(list, Some(parent_key), key, content, position).await
    }

    pub async fn get_item(&self, list: &str, key: &str, parent_key: Option<&str>) -> Result<Item> {
        let list_row = self.visible_list(&self.db, list).await?;
        self.resolve_item(&self.db, list_row.id, key, parent_key).await
    }

    pub async fn get_subitems(&self, list: &str, parent_key: &str) -> Result<Vec<Item>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let parent = gateway::items::find_unique_by_key(&self.db, list_row.id, parent_key)
            .await?
            .ok_or_else(|| ManagerError::NotFound { entity: "item", key: parent_key.to_string() })?;
        gateway::items::find_children(&self.db, list_row.id, Some(parent.id)).await
    }

    pub async fn get_item_hierarchy(&self, list: &str, root_key: &str) -> Result<ItemHierarchy> {
        let list_row = self.visible_list(&self.db, list).await?;
        let root = gateway::items::find_unique_by_key(&self.db, list_row.id, root_key)
            .await?
            .ok_or_else(|| ManagerError::NotFound { entity: "item", key: root_key.to_string() })?;

        let mut by_parent: HashMap<i32, Vec<Item>> = HashMap::new();
        let mut frontier = vec![root.id];
        while let Some(parent_id) = frontier.pop() {
            let children = gateway::items::find_children(&self.db, list_row.id, Some(parent_id)).await?;
            for child in &children {
                frontier.push(child.id);
            }
            by_parent.insert(parent_id, children);
        }

        Ok(assemble_hierarchy(root, &by_parent))
    }

    pub async fn get_list_items(
        &self,
        list: &str,
        status: Option<ItemStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<Item>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let all_items = gateway::items::find_all_in_list(&self.db, list_row.id).await?;
        let mut result: Vec<Item> = traversal::hierarchical_order(&all_items)
            .into_iter()
            .filter(|item| status.map(|s| item.status == s).unwrap_or(true))
            .cloned()
            .collect();
        if let Some(limit) = limit {
            result.truncate(limit);
        }
        Ok(result)
    }

    pub async fn update_item_status(
        &self,
        list: &str,
        key: &str,
        status: ItemStatus,
        completion_states: Option<HashMap<String, bool>>,
        parent_key: Option<&str>,
    ) -> Result<Item> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let item = self.resolve_item(&txn, list_row.id, key, parent_key).await?;

        let children = gateway::items::find_children(&txn, list_row.id, Some(item.id)).await?;
        if !children.is_empty() {
            return Err(ManagerError::HasSubitems { key: key.to_string() });
        }

        if let Some(states) = &completion_states {
            gateway::items::set_completion_states(&txn, item.id, states).await?;
        }

        let now = Utc::now().naive_utc();
        let started_at = match status {
            ItemStatus::Pending => None,
            _ => item.started_at.or(Some(now)),
        };
        let completed_at = if status == ItemStatus::Completed { Some(now) } else { None };

        let old_status = item.status;
        let updated = gateway::items::update_status(&txn, item.id, status, started_at, completed_at).await?;

        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            match status {
                ItemStatus::Completed => HistoryAction::Completed,
                ItemStatus::Failed => HistoryAction::Failed,
                _ => HistoryAction::StatusUpdated,
            },
            Some(old_status.as_str().to_string()),
            Some(status.as_str().to_string()),
            None,
        )
        .await?;

        if let Some(parent_id) = item.parent_item_id {
            self.recompute_ancestor_status(&txn, parent_id).await?;
        }

        txn.commit().await?;
        Ok(updated)
    }

    pub async fn update_item_content(
        &self,
        list: &str,
        key: &str,
        content: &str,
        parent_key: Option<&str>,
    ) -> Result<Item> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let item = self.resolve_item(&txn, list_row.id, key, parent_key).await?;

        let old_content = item.content.clone();
        let updated = gateway::items::update_content(&txn, item.id, content).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            HistoryAction::ContentUpdated,
            Some(old_content),
            Some(content.to_string()),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn rename_item(
        &self,
        list: &str,
        key: &str,
        new_key: &str,
        parent_key: Option<&str>,
    ) -> Result<Item> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let item = self.resolve_item(&txn, list_row.id, key, parent_key).await?;

        if gateway::items::find_by_key_and_parent(&txn, list_row.id, item.parent_item_id, new_key)
            .await?
            .is_some()
        {
            return Err(ManagerError::AlreadyExists { entity: "item", key: new_key.to_string() });
        }

        let updated = gateway::items::rename(&txn, item.id, new_key).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            HistoryAction::Renamed,
            Some(key.to_string()),
            Some(new_key.to_string()),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Resets `completion_states` to empty without touching `status` —
    /// a supplemented operation distinct from a status change.
    pub async fn clear_item_completion_states(
        &self,
        list: &str,
        key: &str,
        parent_key: Option<&str>,
    ) -> Result<Item> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let item = self.resolve_item(&txn, list_row.id, key, parent_key).await?;

        gateway::items::clear_completion_states(&txn, item.id).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            HistoryAction::StatesCleared,
            None,
            None,
            None,
        )
        .await?;
        txn.commit().await?;

        gateway::items::find_by_id(&self.db, item.id)
            .await?
            .ok_or_else(|| ManagerError::NotFound { entity: "item", key: key.to_string() })
    }

    pub async fn delete_item(&self, list: &str, key: &str, parent_key: Option<&str>) -> Result<()> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let item = self.resolve_item(&txn, list_row.id, key, parent_key).await?;
        let parent_id = item.parent_item_id;

        gateway::cascade::delete_item_subtree(&txn, item.id).await?;

        if let Some(parent_id) = parent_id {
            self.recompute_ancestor_status(&txn, parent_id).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Reparents a root item under another item, which becomes its
    /// parent. Only root items can be moved this way — an item already
    /// nested is relocated by deleting and re-adding it under the new
    /// parent, since a three-argument "move anything anywhere" surface
    /// would make the sibling-uniqueness and ancestor-status bookkeeping
    /// ambiguous about which subtree is "old" when source and
    /// destination overlap.
    pub async fn move_to_subitem(&self, list: &str, key: &str, new_parent_key: &str) -> Result<Item> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;

        let item = gateway::items::find_by_key_and_parent(&txn, list_row.id, None, key)
            .await?
            .ok_or_else(|| ManagerError::NotFound { entity: "item", key: key.to_string() })?;

        let new_parent = gateway::items::find_unique_by_key(&txn, list_row.id, new_parent_key)
            .await?
            .ok_or_else(|| ManagerError::NotFound { entity: "item", key: new_parent_key.to_string() })?;

        if new_parent.id == item.id {
            return Err(ManagerError::InvalidArgument("an item cannot become its own parent".to_string()));
        }

        if gateway::items::find_by_key_and_parent(&txn, list_row.id, Some(new_parent.id), key)
            .await?
            .is_some()
        {
            return Err(ManagerError::AlreadyExists { entity: "item", key: key.to_string() });
        }

        let position = gateway::items::next_position(&txn, list_row.id, Some(new_parent.id)).await?;
        let updated = gateway::items::reparent(&txn, item.id, Some(new_parent.id), position).await?;

        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            HistoryAction::MovedToSubitem,
            None,
            Some(new_parent_key.to_string()),
            None,
        )
        .await?;

        self.recompute_ancestor_status(&txn, new_parent.id).await?;

        txn.commit().await?;
        Ok(updated)
    }
}

fn assemble_hierarchy(item: Item, by_parent: &HashMap<i32, Vec<Item>>) -> ItemHierarchy {
    let children = by_parent
        .get(&item.id)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|child| assemble_hierarchy(child, by_parent))
        .collect();
    ItemHierarchy { item, children }
}
