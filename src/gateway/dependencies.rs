use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::domain::Dependency;
use crate::error::Result;

fn dependency_from_model(model: entity::item_dependencies::Model) -> Dependency {
    Dependency {
        dependent_item_id: model.dependent_item_id,
        required_item_id: model.required_item_id,
    }
}

pub async fn exists<C: ConnectionTrait>(
    conn: &C,
    dependent_item_id: i32,
    required_item_id: i32,
) -> Result<bool> {
    let found = entity::ItemDependencies::find()
        .filter(entity::item_dependencies::Column::DependentItemId.eq(dependent_item_id))
        .filter(entity::item_dependencies::Column::RequiredItemId.eq(required_item_id))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dependent_item_id: i32,
    required_item_id: i32,
) -> Result<()> {
    let active = entity::item_dependencies::ActiveModel {
        dependent_item_id: Set(dependent_item_id),
        required_item_id: Set(required_item_id),
    };
    sea_orm::ActiveModelTrait::insert(active, conn).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    dependent_item_id: i32,
    required_item_id: i32,
) -> Result<()> {
    entity::ItemDependencies::delete_many()
        .filter(entity::item_dependencies::Column::DependentItemId.eq(dependent_item_id))
        .filter(entity::item_dependencies::Column::RequiredItemId.eq(required_item_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Items that `item_id` depends on (must complete before it can start).
pub async fn blockers_of<C: ConnectionTrait>(conn: &C, item_id: i32) -> Result<Vec<i32>> {
    let rows = entity::ItemDependencies::find()
        .filter(entity::item_dependencies::Column::DependentItemId.eq(item_id))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|row| row.required_item_id).collect())
}

/// Items that depend on `item_id` (unblocked once it completes).
pub async fn blocked_by<C: ConnectionTrait>(conn: &C, item_id: i32) -> Result<Vec<i32>> {
    let rows = entity::ItemDependencies::find()
        .filter(entity::item_dependencies::Column::RequiredItemId.eq(item_id))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|row| row.dependent_item_id).collect())
}

/// Every dependency edge with at least one endpoint among `item_ids` —
/// the cascade-delete path uses this to enumerate edges to drop without
/// relying purely on the database's `ON DELETE CASCADE`.
pub async fn edges_touching<C: ConnectionTrait>(
    conn: &C,
    item_ids: &[i32],
) -> Result<Vec<Dependency>> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = entity::ItemDependencies::find()
        .filter(
            entity::item_dependencies::Column::DependentItemId
                .is_in(item_ids.to_vec())
                .or(entity::item_dependencies::Column::RequiredItemId.is_in(item_ids.to_vec())),
        )
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(dependency_from_model).collect())
}

/// The whole edge set for a list's items — the cycle detector walks this
/// in memory rather than issuing one query per DFS step.
pub async fn all_edges<C: ConnectionTrait>(conn: &C) -> Result<Vec<Dependency>> {
    let rows = entity::ItemDependencies::find().all(conn).await?;
    Ok(rows.into_iter().map(dependency_from_model).collect())
}
