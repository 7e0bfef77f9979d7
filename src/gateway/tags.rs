use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::domain::{Tag, DEFAULT_TAG_COLOR};
use crate::error::Result;

use super::convert::tag_from_model;

pub async fn find_by_name<C: ConnectionTrait>(conn: &C, name: &str) -> Result<Option<Tag>> {
    let model = entity::ListTags::find()
        .filter(entity::list_tags::Column::Name.eq(name))
        .one(conn)
        .await?;
    model.map(tag_from_model).transpose()
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Tag>> {
    let model = entity::ListTags::find_by_id(id).one(conn).await?;
    model.map(tag_from_model).transpose()
}

pub async fn insert<C: ConnectionTrait>(conn: &C, name: &str, color: Option<&str>) -> Result<Tag> {
    let active = entity::list_tags::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(name.to_string()),
        color: Set(color.unwrap_or(DEFAULT_TAG_COLOR).to_string()),
    };
    let model = sea_orm::ActiveModelTrait::insert(active, conn).await?;
    tag_from_model(model)
}

/// Fetches an existing tag by name or creates it with the default color.
/// Used both for explicit `tag add` and for the forced-tag auto-creation
/// that happens on `create_list`.
pub async fn find_or_create<C: ConnectionTrait>(conn: &C, name: &str) -> Result<Tag> {
    if let Some(tag) = find_by_name(conn, name).await? {
        return Ok(tag);
    }
    insert(conn, name, None).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<()> {
    entity::ListTags::delete_by_id(id).exec(conn).await?;
    Ok(())
}

pub async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Tag>> {
    let models = entity::ListTags::find().all(conn).await?;
    models.into_iter().map(tag_from_model).collect()
}

pub async fn assign<C: ConnectionTrait>(conn: &C, list_id: i32, tag_id: i32) -> Result<()> {
    let already = entity::ListTagAssignments::find()
        .filter(entity::list_tag_assignments::Column::ListId.eq(list_id))
        .filter(entity::list_tag_assignments::Column::TagId.eq(tag_id))
        .one(conn)
        .await?;
    if already.is_some() {
        return Ok(());
    }
    let active = entity::list_tag_assignments::ActiveModel {
        list_id: Set(list_id),
        tag_id: Set(tag_id),
    };
    sea_orm::ActiveModelTrait::insert(active, conn).await?;
    Ok(())
}

pub async fn unassign<C: ConnectionTrait>(conn: &C, list_id: i32, tag_id: i32) -> Result<()> {
    entity::ListTagAssignments::delete_many()
        .filter(entity::list_tag_assignments::Column::ListId.eq(list_id))
        .filter(entity::list_tag_assignments::Column::TagId.eq(tag_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn for_list<C: ConnectionTrait>(conn: &C, list_id: i32) -> Result<Vec<Tag>> {
    let tag_ids: Vec<i32> = entity::ListTagAssignments::find()
        .filter(entity::list_tag_assignments::Column::ListId.eq(list_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.tag_id)
        .collect();
    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }
    let models = entity::ListTags::find()
        .filter(entity::list_tags::Column::Id.is_in(tag_ids))
        .all(conn)
        .await?;
    models.into_iter().map(tag_from_model).collect()
}
