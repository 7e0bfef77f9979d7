use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::error::Result;

pub async fn get_list_property<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    key: &str,
) -> Result<Option<String>> {
    let model = entity::ListProperties::find()
        .filter(entity::list_properties::Column::ListId.eq(list_id))
        .filter(entity::list_properties::Column::Key.eq(key))
        .one(conn)
        .await?;
    Ok(model.map(|row| row.value))
}

pub async fn set_list_property<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    key: &str,
    value: &str,
) -> Result<()> {
    let existing = entity::ListProperties::find()
        .filter(entity::list_properties::Column::ListId.eq(list_id))
        .filter(entity::list_properties::Column::Key.eq(key))
        .one(conn)
        .await?;
    match existing {
        Some(model) => {
            let mut active: entity::list_properties::ActiveModel = model.into();
            active.value = Set(value.to_string());
            sea_orm::ActiveModelTrait::update(active, conn).await?;
        }
        None => {
            let active = entity::list_properties::ActiveModel {
                list_id: Set(list_id),
                key: Set(key.to_string()),
                value: Set(value.to_string()),
            };
            sea_orm::ActiveModelTrait::insert(active, conn).await?;
        }
    }
    Ok(())
}

pub async fn delete_list_property<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
    key: &str,
) -> Result<()> {
    entity::ListProperties::delete_many()
        .filter(entity::list_properties::Column::ListId.eq(list_id))
        .filter(entity::list_properties::Column::Key.eq(key))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn all_list_properties<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
) -> Result<Vec<(String, String)>> {
    let rows = entity::ListProperties::find()
        .filter(entity::list_properties::Column::ListId.eq(list_id))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
}

pub async fn get_item_property<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
    key: &str,
) -> Result<Option<String>> {
    let model = entity::ItemProperties::find()
        .filter(entity::item_properties::Column::ItemId.eq(item_id))
        .filter(entity::item_properties::Column::Key.eq(key))
        .one(conn)
        .await?;
    Ok(model.map(|row| row.value))
}

pub async fn set_item_property<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
    key: &str,
    value: &str,
) -> Result<()> {
    let existing = entity::ItemProperties::find()
        .filter(entity::item_properties::Column::ItemId.eq(item_id))
        .filter(entity::item_properties::Column::Key.eq(key))
        .one(conn)
        .await?;
    match existing {
        Some(model) => {
            let mut active: entity::item_properties::ActiveModel = model.into();
            active.value = Set(value.to_string());
            sea_orm::ActiveModelTrait::update(active, conn).await?;
        }
        None => {
            let active = entity::item_properties::ActiveModel {
                item_id: Set(item_id),
                key: Set(key.to_string()),
                value: Set(value.to_string()),
            };
            sea_orm::ActiveModelTrait::insert(active, conn).await?;
        }
    }
    Ok(())
}

pub async fn delete_item_property<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
    key: &str,
) -> Result<()> {
    entity::ItemProperties::delete_many()
        .filter(entity::item_properties::Column::ItemId.eq(item_id))
        .filter(entity::item_properties::Column::Key.eq(key))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn all_item_properties<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
) -> Result<Vec<(String, String)>> {
    let rows = entity::ItemProperties::find()
        .filter(entity::item_properties::Column::ItemId.eq(item_id))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
}

/// Properties for every item in `item_ids`, keyed by item id — the
/// traversal-ordered `get_all_items_properties` builds its rows from this
/// rather than issuing one query per item.
pub async fn properties_for_items<C: ConnectionTrait>(
    conn: &C,
    item_ids: &[i32],
) -> Result<Vec<(i32, String, String)>> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = entity::ItemProperties::find()
        .filter(entity::item_properties::Column::ItemId.is_in(item_ids.to_vec()))
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.item_id, row.key, row.value))
        .collect())
}
