use std::collections::HashMap;

use crate::domain::{Item, ItemKey, ItemStatus, List, ListKey, ListStatus, Tag, TagName};
use crate::error::Result;

pub fn list_from_model(model: entity::lists::Model) -> Result<List> {
    Ok(List {
        id: model.id,
        list_key: ListKey::new(model.list_key)?,
        title: model.title,
        status: ListStatus::from_str(&model.status)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub fn item_from_model(
    model: entity::todo_items::Model,
    completion_states: HashMap<String, bool>,
) -> Result<Item> {
    Ok(Item {
        id: model.id,
        list_id: model.list_id,
        parent_item_id: model.parent_item_id,
        item_key: ItemKey::new(model.item_key)?,
        content: model.content,
        status: ItemStatus::from_str(&model.status)?,
        position: model.position,
        completion_states,
        started_at: model.started_at,
        completed_at: model.completed_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub fn tag_from_model(model: entity::list_tags::Model) -> Result<Tag> {
    Ok(Tag {
        id: model.id,
        name: TagName::new(model.name)?,
        color: model.color,
    })
}
