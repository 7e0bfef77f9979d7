use sea_orm::TransactionTrait;

use crate::domain::{HistoryAction, HistoryEntityType, Tag};
use crate::error::{ManagerError, Result};
use crate::gateway;

use super::Manager;

impl Manager {
    pub async fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag> {
        let name = name.to_lowercase();
        if gateway::tags::find_by_name(&self.db, &name).await?.is_some() {
            return Err(ManagerError::AlreadyExists { entity: "tag", key: name });
        }
        gateway::tags::insert(&self.db, &name, color).await
    }

    pub async fn add_tag_to_list(&self, list: &str, tag_name: &str) -> Result<()> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let tag = gateway::tags::find_or_create(&txn, &tag_name.to_lowercase()).await?;
        gateway::tags::assign(&txn, list_row.id, tag.id).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list_row.id,
            HistoryAction::Updated,
            None,
            Some(tag.name.as_str().to_string()),
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn remove_tag_from_list(&self, list: &str, tag_name: &str) -> Result<()> {
        let txn = self.db.begin().await?;
        let list_row = self.visible_list(&txn, list).await?;
        let tag_name = tag_name.to_lowercase();
        let tag = gateway::tags::find_by_name(&txn, &tag_name)
            .await?
            .ok_or_else(|| ManagerError::NotFound { entity: "tag", key: tag_name.clone() })?;
        gateway::tags::unassign(&txn, list_row.id, tag.id).await?;
        gateway::history::append(
            &txn,
            HistoryEntityType::List,
            list_row.id,
            HistoryAction::Updated,
            Some(tag_name),
            None,
            None,
        )
        .await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn get_tags_for_list(&self, list: &str) -> Result<Vec<Tag>> {
        let list_row = self.visible_list(&self.db, list).await?;
        gateway::tags::for_list(&self.db, list_row.id).await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        gateway::tags::find_all(&self.db).await
    }
}
