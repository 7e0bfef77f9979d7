use std::collections::HashMap;

use crate::domain::Item;
use crate::error::Result;
use crate::gateway;
use crate::traversal;

use super::Manager;

impl Manager {
    /// Resolves, for each item, whether any of its direct blockers is
    /// not yet completed. One query per item is acceptable here: this
    /// runs over a single list's snapshot, not the whole store.
    async fn blocked_map(&self, items: &[Item]) -> Result<HashMap<i32, bool>> {
        let mut blocked = HashMap::new();
        for item in items {
            let blockers = gateway::dependencies::blockers_of(&self.db, item.id).await?;
            let mut is_blocked = false;
            for blocker_id in blockers {
                if let Some(blocker) = gateway::items::find_by_id(&self.db, blocker_id).await? {
                    if !blocker.status.is_completed() {
                        is_blocked = true;
                        break;
                    }
                }
            }
            blocked.insert(item.id, is_blocked);
        }
        Ok(blocked)
    }

    /// Flat variant: first pending, unblocked root item in position order.
    pub async fn get_next_pending(&self, list: &str) -> Result<Option<Item>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let roots = gateway::items::find_children(&self.db, list_row.id, None).await?;
        let blocked = self.blocked_map(&roots).await?;
        Ok(traversal::next_pending_flat(&roots, &|id| blocked.get(&id).copied().unwrap_or(false)).cloned())
    }

    /// Hierarchy-aware variant: prioritizes an already in-progress
    /// subtree, otherwise walks the whole tree in pre-order for the
    /// first pending, unblocked leaf.
    pub async fn get_next_pending_smart(&self, list: &str) -> Result<Option<Item>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let all_items = gateway::items::find_all_in_list(&self.db, list_row.id).await?;
        let blocked = self.blocked_map(&all_items).await?;
        Ok(
            traversal::next_pending_hierarchical(&all_items, &|id| blocked.get(&id).copied().unwrap_or(false))
                .cloned(),
        )
    }

    pub async fn get_next_pending_with_subtasks(&self, list: &str) -> Result<Option<Item>> {
        self.get_next_pending_smart(list).await
    }
}
