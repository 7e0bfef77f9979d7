use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::domain::HistoryEntityType;
use crate::error::Result;

use super::{dependencies, history, items};

/// Deletes a list and everything hanging off it, in dependency-safe
/// order. The schema's `ON DELETE CASCADE` would get most of this for
/// free, but `history` rows carry no foreign key (they're polymorphic
/// and must survive past the row they describe), so they're enumerated
/// and removed explicitly here rather than left to the database.
pub async fn delete_list_cascade<C: ConnectionTrait>(conn: &C, list_id: i32) -> Result<()> {
    let list_items = items::find_all_in_list(conn, list_id).await?;
    let item_ids: Vec<i32> = list_items.iter().map(|item| item.id).collect();

    let edges = dependencies::edges_touching(conn, &item_ids).await?;
    for edge in edges {
        dependencies::delete(conn, edge.dependent_item_id, edge.required_item_id).await?;
    }

    for &item_id in &item_ids {
        items::clear_completion_states(conn, item_id).await?;
    }

    entity::ItemProperties::delete_many()
        .filter(entity::item_properties::Column::ItemId.is_in(item_ids.clone()))
        .exec(conn)
        .await?;

    entity::ListProperties::delete_many()
        .filter(entity::list_properties::Column::ListId.eq(list_id))
        .exec(conn)
        .await?;

    entity::ListTagAssignments::delete_many()
        .filter(entity::list_tag_assignments::Column::ListId.eq(list_id))
        .exec(conn)
        .await?;

    history::delete_for_entities(conn, HistoryEntityType::Item, &item_ids).await?;
    history::delete_for_entities(conn, HistoryEntityType::List, &[list_id]).await?;

    // Deepest items first so a parent's self-referencing FK is never
    // violated by deleting it ahead of its children.
    let mut by_depth = list_items;
    by_depth.sort_by_key(|item| item.parent_item_id.is_none());
    for item in by_depth {
        items::delete(conn, item.id).await?;
    }

    entity::Lists::delete_by_id(list_id).exec(conn).await?;
    Ok(())
}

/// Deletes one item and its whole descendant subtree. The self-
/// referencing foreign key on `todo_items` cascades child rows
/// automatically once the root of the subtree is removed, so only
/// `history` (no foreign key by design) needs explicit cleanup first.
/// Returns the ids that were removed, for callers that want to know.
pub async fn delete_item_subtree<C: ConnectionTrait>(conn: &C, item_id: i32) -> Result<Vec<i32>> {
    let mut subtree_ids = vec![item_id];
    let mut frontier = vec![item_id];
    while let Some(parent_id) = frontier.pop() {
        let children = entity::TodoItems::find()
            .filter(entity::todo_items::Column::ParentItemId.eq(parent_id))
            .all(conn)
            .await?;
        for child in children {
            frontier.push(child.id);
            subtree_ids.push(child.id);
        }
    }

    let edges = dependencies::edges_touching(conn, &subtree_ids).await?;
    for edge in edges {
        dependencies::delete(conn, edge.dependent_item_id, edge.required_item_id).await?;
    }

    for &id in &subtree_ids {
        items::clear_completion_states(conn, id).await?;
    }

    entity::ItemProperties::delete_many()
        .filter(entity::item_properties::Column::ItemId.is_in(subtree_ids.clone()))
        .exec(conn)
        .await?;

    history::delete_for_entities(conn, HistoryEntityType::Item, &subtree_ids).await?;

    entity::TodoItems::delete_by_id(item_id).exec(conn).await?;
    Ok(subtree_ids)
}
