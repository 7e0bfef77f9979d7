use chrono::Utc;
use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::{List, ListStatus};
use crate::error::Result;

use super::convert::list_from_model;

pub async fn find_by_key<C: ConnectionTrait>(conn: &C, list_key: &str) -> Result<Option<List>> {
    let model = entity::Lists::find()
        .filter(entity::lists::Column::ListKey.eq(list_key))
        .one(conn)
        .await?;
    model.map(list_from_model).transpose()
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<List>> {
    let model = entity::Lists::find_by_id(id).one(conn).await?;
    model.map(list_from_model).transpose()
}

pub async fn insert<C: ConnectionTrait>(conn: &C, list_key: &str, title: &str) -> Result<List> {
    let now = Utc::now().naive_utc();
    let active = entity::lists::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        list_key: Set(list_key.to_string()),
        title: Set(title.to_string()),
        status: Set(ListStatus::Active.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let model = sea_orm::ActiveModelTrait::insert(active, conn).await?;
    list_from_model(model)
}

pub async fn update_title<C: ConnectionTrait>(conn: &C, id: i32, title: &str) -> Result<List> {
    let model = entity::Lists::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::error::ManagerError::NotFound { entity: "list", key: id.to_string() })?;
    let mut active: entity::lists::ActiveModel = model.into();
    active.title = Set(title.to_string());
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = sea_orm::ActiveModelTrait::update(active, conn).await?;
    list_from_model(updated)
}

pub async fn update_status<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    status: ListStatus,
) -> Result<List> {
    let model = entity::Lists::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::error::ManagerError::NotFound { entity: "list", key: id.to_string() })?;
    let mut active: entity::lists::ActiveModel = model.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = sea_orm::ActiveModelTrait::update(active, conn).await?;
    list_from_model(updated)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<()> {
    entity::Lists::delete_by_id(id).exec(conn).await?;
    Ok(())
}

/// All lists, optionally restricted to those intersecting `tag_ids` and
/// optionally excluding archived lists. Ordering is by id for determinism.
pub async fn find_all<C: ConnectionTrait>(
    conn: &C,
    tag_ids: Option<&[i32]>,
    include_archived: bool,
) -> Result<Vec<List>> {
    let mut query = entity::Lists::find();

    if !include_archived {
        query = query.filter(entity::lists::Column::Status.eq(ListStatus::Active.as_str()));
    }

    if let Some(tag_ids) = tag_ids {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        let matching_list_ids: Vec<i32> = entity::ListTagAssignments::find()
            .filter(entity::list_tag_assignments::Column::TagId.is_in(tag_ids.to_vec()))
            .all(conn)
            .await?
            .into_iter()
            .map(|row| row.list_id)
            .collect();
        query = query.filter(entity::lists::Column::Id.is_in(matching_list_ids));
    }

    let models = query.order_by_asc(entity::lists::Column::Id).all(conn).await?;
    models.into_iter().map(list_from_model).collect()
}
