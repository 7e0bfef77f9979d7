use sea_orm::TransactionTrait;

use crate::domain::{HistoryAction, HistoryEntityType, List, ListStatus};
use crate::error::{ManagerError, Result};
use crate::gateway;

use super::Manager;

impl Manager {
    async fn list_tag_names<C: sea_orm::ConnectionTrait>(&self, conn: &C, list_id: i32) -> Result<Vec<String>> {
        Ok(gateway::tags::for_list(conn, list_id)
            .await?
            .into_iter()
            .map(|tag| tag.name.as_str().to_string())
            .collect())
    }

    /// Fetches a list by key and enforces the forced-tag filter: a list
    /// outside the forced set behaves as if it does not exist at all,
    /// so callers never learn it was excluded rather than absent.
    pub(super) async fn visible_list<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        list_key: &str,
    ) -> Result<List> {
        let list = gateway::lists::find_by_key(conn, list_key)
            .await?
            .ok_or_else(|| ManagerError::NotFound { entity: "list", key: list_key.to_string() })?;
        let tag_names = self.list_tag_names(conn, list.id).await?;
        if !self.forced_tags.permits(&tag_names) {
            return Err(ManagerError::NotFound { entity: "list", key: list_key.to_string() });
        }
        Ok(list)
    }

    pub async fn create_list(
        &self,
        key: &str,
        title: &str,
        items: Option<Vec<(String, String)>>,
        tags: Option<Vec<String>>,
    ) -> Result<List> {
        let txn = self.db.begin().await?;

        if gateway::lists::find_by_key(&txn, key).await?.is_some() {
            return Err(ManagerError::AlreadyExists { entity: "list", key: key.to_string() });
        }

        let list = gateway::lists::insert(&txn, key, title).await?;

        let mut tag_names: Vec<String> = tags.unwrap_or_default();
        for forced in self.forced_tags.tags() {
            if !tag_names.iter().any(|name| name.eq_ignore_ascii_case(forced)) {
                tag_names.push(forced.to_string());
            }
        }
        for tag_name in &tag_names {
            let tag = gateway::tags::find_or_create(&txn, &tag_name.to_lowercase()).await?;
            gateway::tags::assign(&txn, list.id, tag.id).await?;
        }

        if let Some(items) = items {
            if !items.is_empty() {
                gateway::items::bulk_insert_roots(&txn, list.id, &items).await?;
            }
        }

        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list.id,
            HistoryAction::Created,
            None,
            Some(list.title.clone()),
            None,
        )
        .await?;

        txn.commit().await?;
        Ok(list)
    }

    pub async fn get_list(&self, key: &str) -> Result<List> {
        self.visible_list(&self.db, key).await
    }

    pub async fn list_all(&self, filter_tags: Option<&[String]>, include_archived: bool) -> Result<Vec<List>> {
        let candidates = gateway::lists::find_all(&self.db, None, include_archived).await?;
        let mut result = Vec::new();
        for list in candidates {
            let tag_names = self.list_tag_names(&self.db, list.id).await?;
            if !self.forced_tags.permits(&tag_names) {
                continue;
            }
            if let Some(filter) = filter_tags {
                if !filter.is_empty() {
                    let lowered: Vec<String> = filter.iter().map(|name| name.to_lowercase()).collect();
                    if !tag_names.iter().any(|name| lowered.contains(name)) {
                        continue;
                    }
                }
            }
            result.push(list);
        }
        Ok(result)
    }

    pub async fn rename_list(&self, key: &str, new_title: &str) -> Result<List> {
        let txn = self.db.begin().await?;
        let list = self.visible_list(&txn, key).await?;
        let old_title = list.title.clone();
        let updated = gateway::lists::update_title(&txn, list.id, new_title).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list.id,
            HistoryAction::RenameList,
            Some(old_title),
            Some(new_title.to_string()),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn archive_list(&self, key: &str, force: bool) -> Result<List> {
        let txn = self.db.begin().await?;
        let list = self.visible_list(&txn, key).await?;

        if list.status == ListStatus::Archived {
            return Err(ManagerError::AlreadyArchived { key: key.to_string() });
        }

        if !force {
            let items = gateway::items::find_all_in_list(&txn, list.id).await?;
            let total = items.len();
            let incomplete = items.iter().filter(|item| !item.status.is_completed()).count();
            if incomplete > 0 {
                return Err(ManagerError::IncompletePrecondition {
                    list_key: key.to_string(),
                    incomplete,
                    total,
                });
            }
        }

        let updated = gateway::lists::update_status(&txn, list.id, ListStatus::Archived).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list.id,
            HistoryAction::StatusUpdated,
            Some(ListStatus::Active.as_str().to_string()),
            Some(ListStatus::Archived.as_str().to_string()),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn unarchive_list(&self, key: &str) -> Result<List> {
        let txn = self.db.begin().await?;
        let list = self.visible_list(&txn, key).await?;
        if list.status == ListStatus::Active {
            return Ok(list);
        }
        let updated = gateway::lists::update_status(&txn, list.id, ListStatus::Active).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list.id,
            HistoryAction::StatusUpdated,
            Some(ListStatus::Archived.as_str().to_string()),
            Some(ListStatus::Active.as_str().to_string()),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// History rows for the list and its items are themselves part of the
    /// cascade, so nothing is appended here — a `deleted` entry would
    /// just be wiped a moment later along with everything else.
    pub async fn delete_list(&self, key: &str) -> Result<()> {
        let txn = self.db.begin().await?;
        let list = self.visible_list(&txn, key).await?;
        gateway::cascade::delete_list_cascade(&txn, list.id).await?;
        txn.commit().await?;
        Ok(())
    }
}
