use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
};

use crate::domain::{Item, ItemStatus};
use crate::error::Result;

use super::convert::item_from_model;

async fn completion_states<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
) -> Result<HashMap<String, bool>> {
    let rows = entity::ItemCompletionStates::find()
        .filter(entity::item_completion_states::Column::ItemId.eq(item_id))
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.state_key, row.state_value))
        .collect())
}

async fn hydrate<C: ConnectionTrait>(conn: &C, model: entity::todo_items::Model) -> Result<Item> {
    let states = completion_states(conn, model.id).await?;
    item_from_model(model, states)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Item>> {
    match entity::TodoItems::find_by_id(id).one(conn).await? {
        Some(model) => Ok(Some(hydrate(conn, model).await?)),
        None => Ok(None),
    }
}

/// Looks up an item by key scoped to its sibling group. `parent_item_id
/// = None` means "among the root items of the list" — this is the
/// mechanism that makes subitem access parent-scoped.
pub async fn find_by_key_and_parent<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    parent_item_id: Option<i32>,
    item_key: &str,
) -> Result<Option<Item>> {
    let mut query = entity::TodoItems::find()
        .filter(entity::todo_items::Column::ListId.eq(list_id))
        .filter(entity::todo_items::Column::ItemKey.eq(item_key));
    query = match parent_item_id {
        Some(parent_id) => query.filter(entity::todo_items::Column::ParentItemId.eq(parent_id)),
        None => query.filter(entity::todo_items::Column::ParentItemId.is_null()),
    };
    match query.one(conn).await? {
        Some(model) => Ok(Some(hydrate(conn, model).await?)),
        None => Ok(None),
    }
}

/// Finds an item by key without regard to its parent — used to resolve a
/// `parent_key` argument, which names an item regardless of its own
/// nesting depth. Ambiguous only when two sibling groups in the same list
/// happen to share a key, which invariant 2 permits; that case is
/// rejected rather than silently picking one.
pub async fn find_unique_by_key<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    item_key: &str,
) -> Result<Option<Item>> {
    let models = entity::TodoItems::find()
        .filter(entity::todo_items::Column::ListId.eq(list_id))
        .filter(entity::todo_items::Column::ItemKey.eq(item_key))
        .all(conn)
        .await?;
    match models.len() {
        0 => Ok(None),
        1 => Ok(Some(hydrate(conn, models.into_iter().next().unwrap()).await?)),
        _ => Err(crate::error::ManagerError::InvalidArgument(format!(
            "item key '{item_key}' is ambiguous as a parent reference: it appears in more than one sibling group"
        ))),
    }
}

pub async fn find_children<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    parent_item_id: Option<i32>,
) -> Result<Vec<Item>> {
    let mut query = entity::TodoItems::find()
        .filter(entity::todo_items::Column::ListId.eq(list_id));
    query = match parent_item_id {
        Some(parent_id) => query.filter(entity::todo_items::Column::ParentItemId.eq(parent_id)),
        None => query.filter(entity::todo_items::Column::ParentItemId.is_null()),
    };
    let models = query
        .order_by_asc(entity::todo_items::Column::Position)
        .all(conn)
        .await?;
    let mut items = Vec::with_capacity(models.len());
    for model in models {
        items.push(hydrate(conn, model).await?);
    }
    Ok(items)
}

/// Every item belonging to a list, raw (not in traversal order) — used
/// by the cascade-delete and cycle-detection paths which don't care
/// about display ordering.
pub async fn find_all_in_list<C: ConnectionTrait>(conn: &C, list_id: i32) -> Result<Vec<Item>> {
    let models = entity::TodoItems::find()
        .filter(entity::todo_items::Column::ListId.eq(list_id))
        .all(conn)
        .await?;
    let mut items = Vec::with_capacity(models.len());
    for model in models {
        items.push(hydrate(conn, model).await?);
    }
    Ok(items)
}

/// The next free position within a sibling group: one past the current
/// maximum, or 1 if the group is empty. Positions are dense but gaps are
/// tolerated — this only fills the next slot, it never renumbers.
pub async fn next_position<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    parent_item_id: Option<i32>,
) -> Result<i32> {
    let siblings = find_children(conn, list_id, parent_item_id).await?;
    Ok(siblings.iter().map(|item| item.position).max().unwrap_or(0) + 1)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    parent_item_id: Option<i32>,
    item_key: &str,
    content: &str,
    position: i32,
) -> Result<Item> {
    let now = Utc::now().naive_utc();
    let active = entity::todo_items::ActiveModel {
        id: NotSet,
        list_id: Set(list_id),
        parent_item_id: Set(parent_item_id),
        item_key: Set(item_key.to_string()),
        content: Set(content.to_string()),
        status: Set(ItemStatus::Pending.as_str().to_string()),
        position: Set(position),
        started_at: Set(None),
        completed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let model = sea_orm::ActiveModelTrait::insert(active, conn).await?;
    hydrate(conn, model).await
}

/// Bulk-inserts a flat run of root items with positions `1..=n` in a
/// single statement — the N+1 hot path `create_list(items=...)` avoids.
pub async fn bulk_insert_roots<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    items: &[(String, String)],
) -> Result<Vec<Item>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let now = Utc::now().naive_utc();
    let models: Vec<entity::todo_items::ActiveModel> = items
        .iter()
        .enumerate()
        .map(|(idx, (key, content))| entity::todo_items::ActiveModel {
            id: NotSet,
            list_id: Set(list_id),
            parent_item_id: Set(None),
            item_key: Set(key.clone()),
            content: Set(content.clone()),
            status: Set(ItemStatus::Pending.as_str().to_string()),
            position: Set(idx as i32 + 1),
            started_at: Set(None),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .collect();
    entity::TodoItems::insert_many(models).exec(conn).await?;
    find_children(conn, list_id, None).await
}

pub async fn update_status<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    status: ItemStatus,
    started_at: Option<chrono::NaiveDateTime>,
    completed_at: Option<chrono::NaiveDateTime>,
) -> Result<Item> {
    let model = entity::TodoItems::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::error::ManagerError::NotFound { entity: "item", key: id.to_string() })?;
    let mut active: entity::todo_items::ActiveModel = model.into();
    active.status = Set(status.as_str().to_string());
    active.started_at = Set(started_at);
    active.completed_at = Set(completed_at);
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = sea_orm::ActiveModelTrait::update(active, conn).await?;
    hydrate(conn, updated).await
}

pub async fn update_content<C: ConnectionTrait>(conn: &C, id: i32, content: &str) -> Result<Item> {
    let model = entity::TodoItems::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::error::ManagerError::NotFound { entity: "item", key: id.to_string() })?;
    let mut active: entity::todo_items::ActiveModel = model.into();
    active.content = Set(content.to_string());
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = sea_orm::ActiveModelTrait::update(active, conn).await?;
    hydrate(conn, updated).await
}

pub async fn rename<C: ConnectionTrait>(conn: &C, id: i32, new_key: &str) -> Result<Item> {
    let model = entity::TodoItems::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::error::ManagerError::NotFound { entity: "item", key: id.to_string() })?;
    let mut active: entity::todo_items::ActiveModel = model.into();
    active.item_key = Set(new_key.to_string());
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = sea_orm::ActiveModelTrait::update(active, conn).await?;
    hydrate(conn, updated).await
}

pub async fn reparent<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    new_parent_item_id: Option<i32>,
    new_position: i32,
) -> Result<Item> {
    let model = entity::TodoItems::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::error::ManagerError::NotFound { entity: "item", key: id.to_string() })?;
    let mut active: entity::todo_items::ActiveModel = model.into();
    active.parent_item_id = Set(new_parent_item_id);
    active.position = Set(new_position);
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = sea_orm::ActiveModelTrait::update(active, conn).await?;
    hydrate(conn, updated).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<()> {
    entity::TodoItems::delete_by_id(id).exec(conn).await?;
    Ok(())
}

pub async fn set_completion_states<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
    states: &HashMap<String, bool>,
) -> Result<()> {
    entity::ItemCompletionStates::delete_many()
        .filter(entity::item_completion_states::Column::ItemId.eq(item_id))
        .exec(conn)
        .await?;
    for (key, value) in states {
        let active = entity::item_completion_states::ActiveModel {
            item_id: Set(item_id),
            state_key: Set(key.clone()),
            state_value: Set(*value),
        };
        sea_orm::ActiveModelTrait::insert(active, conn).await?;
    }
    Ok(())
}

pub async fn clear_completion_states<C: ConnectionTrait>(conn: &C, item_id: i32) -> Result<()> {
    entity::ItemCompletionStates::delete_many()
        .filter(entity::item_completion_states::Column::ItemId.eq(item_id))
        .exec(conn)
        .await?;
    Ok(())
}
