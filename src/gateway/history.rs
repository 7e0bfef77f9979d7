use chrono::Utc;
use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::{HistoryAction, HistoryEntityType, HistoryEntry};
use crate::error::Result;

fn entry_from_model(model: entity::history::Model) -> Result<HistoryEntry> {
    let entity_type = match model.entity_type.as_str() {
        "list" => HistoryEntityType::List,
        "item" => HistoryEntityType::Item,
        other => {
            return Err(crate::error::ManagerError::InvalidArgument(format!(
                "unknown history entity_type: {other}"
            )));
        }
    };
    Ok(HistoryEntry {
        id: model.id,
        entity_type,
        entity_id: model.entity_id,
        action: HistoryAction::from_str(&model.action)?,
        old_value: model.old_value,
        new_value: model.new_value,
        actor: model.actor,
        timestamp: model.timestamp,
    })
}

#[allow(clippy::too_many_arguments)]
pub async fn append<C: ConnectionTrait>(
    conn: &C,
    entity_type: HistoryEntityType,
    entity_id: i32,
    action: HistoryAction,
    old_value: Option<String>,
    new_value: Option<String>,
    actor: Option<String>,
) -> Result<()> {
    let active = entity::history::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        entity_type: Set(entity_type.as_str().to_string()),
        entity_id: Set(entity_id),
        action: Set(action.as_str().to_string()),
        old_value: Set(old_value),
        new_value: Set(new_value),
        actor: Set(actor),
        timestamp: Set(Utc::now().naive_utc()),
    };
    sea_orm::ActiveModelTrait::insert(active, conn).await?;
    Ok(())
}

/// History for a single entity, most recent first.
pub async fn for_entity<C: ConnectionTrait>(
    conn: &C,
    entity_type: HistoryEntityType,
    entity_id: i32,
) -> Result<Vec<HistoryEntry>> {
    let models = entity::History::find()
        .filter(entity::history::Column::EntityType.eq(entity_type.as_str()))
        .filter(entity::history::Column::EntityId.eq(entity_id))
        .order_by_desc(entity::history::Column::Timestamp)
        .all(conn)
        .await?;
    models.into_iter().map(entry_from_model).collect()
}

pub async fn delete_for_entities<C: ConnectionTrait>(
    conn: &C,
    entity_type: HistoryEntityType,
    entity_ids: &[i32],
) -> Result<()> {
    if entity_ids.is_empty() {
        return Ok(());
    }
    entity::History::delete_many()
        .filter(entity::history::Column::EntityType.eq(entity_type.as_str()))
        .filter(entity::history::Column::EntityId.is_in(entity_ids.to_vec()))
        .exec(conn)
        .await?;
    Ok(())
}
