use std::collections::HashMap;

use sea_orm::TransactionTrait;

use crate::domain::{HistoryAction, HistoryEntityType, Item, ItemStatus};
use crate::error::Result;
use crate::gateway;
use crate::traversal;

use super::Manager;

impl Manager {
    pub async fn set_item_property(
        &self,
        list: &str,
        key: &str,
        prop_key: &str,
        prop_value: &str,
        parent_key: Option<&str>,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let item = self.resolve_item(&txn, list_row.id, key, parent_key).await?;
        gateway::properties::set_item_property(&txn, item.id, prop_key, prop_value).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            HistoryAction::Updated,
            None,
            Some(format!("{prop_key}={prop_value}")),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn get_item_property(
        &self,
        list: &str,
        key: &str,
        prop_key: &str,
        parent_key: Option<&str>,
    ) -> Result<Option<String>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let item = self.resolve_item(&self.db, list_row.id, key, parent_key).await?;
        gateway::properties::get_item_property(&self.db, item.id, prop_key).await
    }

    pub async fn get_item_properties(
        &self,
        list: &str,
        key: &str,
        parent_key: Option<&str>,
    ) -> Result<Vec<(String, String)>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let item = self.resolve_item(&self.db, list_row.id, key, parent_key).await?;
        gateway::properties::all_item_properties(&self.db, item.id).await
    }

    pub async fn delete_item_property(
        &self,
        list: &str,
        key: &str,
        prop_key: &str,
        parent_key: Option<&str>,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let item = self.resolve_item(&txn, list_row.id, key, parent_key).await?;
        gateway::properties::delete_item_property(&txn, item.id, prop_key).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::Item,
            item.id,
            HistoryAction::Updated,
            Some(prop_key.to_string()),
            None,
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn set_list_property(&self, list: &str, prop_key: &str, prop_value: &str) -> Result<()> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        gateway::properties::set_list_property(&txn, list_row.id, prop_key, prop_value).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list_row.id,
            HistoryAction::Updated,
            None,
            Some(format!("{prop_key}={prop_value}")),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn get_list_property(&self, list: &str, prop_key: &str) -> Result<Option<String>> {
        let list_row = self.visible_list(&self.db, list).await?;
        gateway::properties::get_list_property(&self.db, list_row.id, prop_key).await
    }

    pub async fn get_list_properties(&self, list: &str) -> Result<Vec<(String, String)>> {
        let list_row = self.visible_list(&self.db, list).await?;
        gateway::properties::all_list_properties(&self.db, list_row.id).await
    }

    pub async fn delete_list_property(&self, list: &str, prop_key: &str) -> Result<()> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        gateway::properties::delete_list_property(&txn, list_row.id, prop_key).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list_row.id,
            HistoryAction::Updated,
            Some(prop_key.to_string()),
            None,
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    /// Flat `(item_key, property_key, property_value, status)` rows in
    /// hierarchical order. `limit` bounds the number of *items*
    /// considered before their properties are expanded — unlike
    /// `get_list_items`, where `limit` bounds returned rows directly.
    pub async fn get_all_items_properties(
        &self,
        list: &str,
        status: Option<ItemStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<(String, String, String, String)>> {
        let list_row = self.visible_list(&self.db, list).await?;
        let all_items = gateway::items::find_all_in_list(&self.db, list_row.id).await?;
        let mut ordered: Vec<&Item> = traversal::hierarchical_order(&all_items)
            .into_iter()
            .filter(|item| status.map(|s| item.status == s).unwrap_or(true))
            .collect();
        if let Some(limit) = limit {
            ordered.truncate(limit);
        }

        let item_ids: Vec<i32> = ordered.iter().map(|item| item.id).collect();
        let props = gateway::properties::properties_for_items(&self.db, &item_ids).await?;

        let mut by_item: HashMap<i32, Vec<(String, String)>> = HashMap::new();
        for (item_id, key, value) in props {
            by_item.entry(item_id).or_default().push((key, value));
        }

        let mut rows = Vec::new();
        for item in ordered {
            let mut item_props = by_item.remove(&item.id).unwrap_or_default();
            item_props.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, value) in item_props {
                rows.push((item.item_key.as_str().to_string(), key, value, item.status.as_str().to_string()));
            }
        }
        Ok(rows)
    }
}
