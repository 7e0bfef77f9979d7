use crate::domain::{HistoryEntityType, HistoryEntry};
use crate::error::Result;
use crate::gateway;

use super::Manager;

impl Manager {
    pub async fn get_item_history(&self, list: &str, key: &str, parent_key: Option<&str>) -> Result<Vec<HistoryEntry>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let item = self.resolve_item(&self.db, list_row.id, key, parent_key).await?;
        gateway::history::for_entity(&self.db, HistoryEntityType::Item, item.id).await
    }

    pub async fn get_list_history(&self, list: &str) -> Result<Vec<HistoryEntry>> {
        let list_row = self.visible_list(&self.db, list).await?;
        gateway::history::for_entity(&self.db, HistoryEntityType::List, list_row.id).await
    }
}
