use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::domain::{HistoryAction, HistoryEntityType, Item};
use crate::error::{ManagerError, Result};
use crate::gateway;
use crate::traversal;

use super::Manager;

impl Manager {
    async fn resolve_root_item<C: ConnectionTrait>(&self, conn: &C, list: &str, key: &str) -> Result<Item> {
        let list_row = self.visible_list(conn, list).await?;
        self.resolve_item(conn, list_row.id, key, None).await
    }

    /// Inserts the dependency edge after checking that both endpoints
    /// exist and that the resulting closure stays acyclic. Endpoints may
    /// belong to different lists.
    pub async fn add_item_dependency(
        &self,
        dep_list: &str,
        dep_key: &str,
        req_list: &str,
        req_key: &str,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let dependent = self.resolve_root_item(&txn, dep_list, dep_key).await?;
        let required = self.resolve_root_item(&txn, req_list, req_key).await?;

        if gateway::dependencies::exists(&txn, dependent.id, required.id).await? {
            return Ok(());
        }

        let edges = gateway::dependencies::all_edges(&txn).await?;
        if traversal::would_create_cycle(&edges, dependent.id, required.id) {
            return Err(ManagerError::WouldCycle {
                dependent_key: dep_key.to_string(),
                required_key: req_key.to_string(),
            });
        }

        gateway::dependencies::insert(&txn, dependent.id, required.id).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            dependent.id,
            HistoryAction::DependencyAdded,
            None,
            Some(req_key.to_string()),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn remove_item_dependency(
        &self,
        dep_list: &str,
        dep_key: &str,
        req_list: &str,
        req_key: &str,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let dependent = self.resolve_root_item(&txn, dep_list, dep_key).await?;
        let required = self.resolve_root_item(&txn, req_list, req_key).await?;
        gateway::dependencies::delete(&txn, dependent.id, required.id).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            dependent.id,
            HistoryAction::DependencyRemoved,
            Some(req_key.to_string()),
            None,
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    /// Direct blockers of `key` whose status is not yet `completed`.
    pub async fn get_item_blockers(&self, list: &str, key: &str) -> Result<Vec<Item>> {
        let item = self.resolve_root_item(&self.db, list, key).await?;
        let blocker_ids = gateway::dependencies::blockers_of(&self.db, item.id).await?;
        let mut blockers = Vec::new();
        for id in blocker_ids {
            if let Some(blocker) = gateway::items::find_by_id(&self.db, id).await? {
                if !blocker.status.is_completed() {
                    blockers.push(blocker);
                }
            }
        }
        Ok(blockers)
    }

    pub async fn get_items_blocked_by(&self, list: &str, key: &str) -> Result<Vec<Item>> {
        let item = self.resolve_root_item(&self.db, list, key).await?;
        let dependent_ids = gateway::dependencies::blocked_by(&self.db, item.id).await?;
        let mut dependents = Vec::new();
        for id in dependent_ids {
            if let Some(dependent) = gateway::items::find_by_id(&self.db, id).await? {
                dependents.push(dependent);
            }
        }
        Ok(dependents)
    }

    pub async fn is_item_blocked(&self, list: &str, key: &str) -> Result<bool> {
        Ok(!self.get_item_blockers(list, key).await?.is_empty())
    }

    pub async fn can_start_item(&self, list: &str, key: &str) -> Result<bool> {
        let item = self.resolve_root_item(&self.db, list, key).await?;
        let blocked = self.is_item_blocked(list, key).await?;
        Ok(traversal::can_start(item.status, blocked))
    }

    pub async fn can_complete_item(&self, list: &str, key: &str) -> Result<bool> {
        let list_row = self.visible_list(&self.db, list).await?;
        let item = self.resolve_item(&self.db, list_row.id, key, None).await?;
        let children = gateway::items::find_children(&self.db, list_row.id, Some(item.id)).await?;
        let child_statuses: Vec<_> = children.iter().map(|child| child.status).collect();
        let blocked = self.is_item_blocked(list, key).await?;
        Ok(traversal::can_complete(&child_statuses, blocked))
    }
}
