use sea_orm_migration::prelude::*;

/// Replaces the list-wide `UNIQUE(list_id, item_key)` constraint with the
/// sibling-scoped one the domain model actually needs: an `item_key` is
/// only unique among items sharing the same `(list_id, parent_item_id)`.
///
/// SQLite treats every `NULL` in a unique index as distinct from every
/// other `NULL`, which would let arbitrarily many root items share a key.
/// The expression index below folds `NULL` (root) down to the sentinel
/// `0`, which no real item id can ever take, to close that gap.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP INDEX IF EXISTS uq_todo_items_list_key_legacy")
            .await?;

        db.execute_unprepared(
            "CREATE UNIQUE INDEX uq_todo_items_sibling_key
             ON todo_items (list_id, COALESCE(parent_item_id, 0), item_key)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX idx_todo_items_list_status_position
             ON todo_items (list_id, status, position)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX idx_item_dependencies_dependent
             ON item_dependencies (dependent_item_id)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX idx_item_dependencies_required
             ON item_dependencies (required_item_id)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP INDEX IF EXISTS idx_item_dependencies_required")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS idx_item_dependencies_dependent")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS idx_todo_items_list_status_position")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS uq_todo_items_sibling_key")
            .await?;

        db.execute_unprepared(
            "CREATE UNIQUE INDEX uq_todo_items_list_key_legacy ON todo_items (list_id, item_key)",
        )
        .await?;

        Ok(())
    }
}
