use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lists::Table)
                    .if_not_exists()
                    .col(pk_auto(Lists::Id))
                    .col(string_uniq(Lists::ListKey))
                    .col(string(Lists::Title))
                    .col(string(Lists::Status).default("active"))
                    .col(timestamp(Lists::CreatedAt))
                    .col(timestamp(Lists::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Historically this table carried UNIQUE(list_id, item_key) — a
        // list-wide uniqueness constraint. m20260101_000002 replaces it
        // with the sibling-scoped constraint the domain model requires.
        manager
            .create_table(
                Table::create()
                    .table(TodoItems::Table)
                    .if_not_exists()
                    .col(pk_auto(TodoItems::Id))
                    .col(integer(TodoItems::ListId))
                    .col(integer_null(TodoItems::ParentItemId))
                    .col(string(TodoItems::ItemKey))
                    .col(text(TodoItems::Content))
                    .col(string(TodoItems::Status).default("pending"))
                    .col(integer(TodoItems::Position))
                    .col(timestamp_null(TodoItems::StartedAt))
                    .col(timestamp_null(TodoItems::CompletedAt))
                    .col(timestamp(TodoItems::CreatedAt))
                    .col(timestamp(TodoItems::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(TodoItems::Table, TodoItems::ListId)
                            .to(Lists::Table, Lists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TodoItems::Table, TodoItems::ParentItemId)
                            .to(TodoItems::Table, TodoItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_todo_items_list_key_legacy")
                    .table(TodoItems::Table)
                    .col(TodoItems::ListId)
                    .col(TodoItems::ItemKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemCompletionStates::Table)
                    .if_not_exists()
                    .col(integer(ItemCompletionStates::ItemId))
                    .col(string(ItemCompletionStates::StateKey))
                    .col(boolean(ItemCompletionStates::StateValue))
                    .primary_key(
                        Index::create()
                            .col(ItemCompletionStates::ItemId)
                            .col(ItemCompletionStates::StateKey),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ItemCompletionStates::Table, ItemCompletionStates::ItemId)
                            .to(TodoItems::Table, TodoItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemDependencies::Table)
                    .if_not_exists()
                    .col(integer(ItemDependencies::DependentItemId))
                    .col(integer(ItemDependencies::RequiredItemId))
                    .primary_key(
                        Index::create()
                            .col(ItemDependencies::DependentItemId)
                            .col(ItemDependencies::RequiredItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ItemDependencies::Table, ItemDependencies::DependentItemId)
                            .to(TodoItems::Table, TodoItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ItemDependencies::Table, ItemDependencies::RequiredItemId)
                            .to(TodoItems::Table, TodoItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ListTags::Table)
                    .if_not_exists()
                    .col(pk_auto(ListTags::Id))
                    .col(string_uniq(ListTags::Name))
                    .col(string(ListTags::Color))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ListTagAssignments::Table)
                    .if_not_exists()
                    .col(integer(ListTagAssignments::ListId))
                    .col(integer(ListTagAssignments::TagId))
                    .primary_key(
                        Index::create()
                            .col(ListTagAssignments::ListId)
                            .col(ListTagAssignments::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ListTagAssignments::Table, ListTagAssignments::ListId)
                            .to(Lists::Table, Lists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ListTagAssignments::Table, ListTagAssignments::TagId)
                            .to(ListTags::Table, ListTags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ListProperties::Table)
                    .if_not_exists()
                    .col(integer(ListProperties::ListId))
                    .col(string(ListProperties::Key))
                    .col(text(ListProperties::Value))
                    .primary_key(
                        Index::create()
                            .col(ListProperties::ListId)
                            .col(ListProperties::Key),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ListProperties::Table, ListProperties::ListId)
                            .to(Lists::Table, Lists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemProperties::Table)
                    .if_not_exists()
                    .col(integer(ItemProperties::ItemId))
                    .col(string(ItemProperties::Key))
                    .col(text(ItemProperties::Value))
                    .primary_key(
                        Index::create()
                            .col(ItemProperties::ItemId)
                            .col(ItemProperties::Key),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ItemProperties::Table, ItemProperties::ItemId)
                            .to(TodoItems::Table, TodoItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(History::Table)
                    .if_not_exists()
                    .col(pk_auto(History::Id))
                    .col(string(History::EntityType))
                    .col(integer(History::EntityId))
                    .col(string(History::Action))
                    .col(text_null(History::OldValue))
                    .col(text_null(History::NewValue))
                    .col(string_null(History::Actor))
                    .col(timestamp(History::Timestamp))
                    .to_owned(),
            )
            .await?;

        // updated_at auto-touch, mirroring the trigger-per-table convention
        // used for the tasks/tags tables in the originating CLI project.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TRIGGER trg_lists_updated_at
                 AFTER UPDATE ON lists
                 FOR EACH ROW
                 WHEN NEW.updated_at = OLD.updated_at
                 BEGIN
                     UPDATE lists SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
                 END;",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TRIGGER trg_todo_items_updated_at
                 AFTER UPDATE ON todo_items
                 FOR EACH ROW
                 WHEN NEW.updated_at = OLD.updated_at
                 BEGIN
                     UPDATE todo_items SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
                 END;",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS trg_lists_updated_at")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS trg_todo_items_updated_at")
            .await?;

        manager
            .drop_table(Table::drop().table(History::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemProperties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ListProperties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ListTagAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ListTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemDependencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemCompletionStates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TodoItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lists::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Lists {
    Table,
    Id,
    ListKey,
    Title,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TodoItems {
    Table,
    Id,
    ListId,
    ParentItemId,
    ItemKey,
    Content,
    Status,
    Position,
    StartedAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ItemCompletionStates {
    Table,
    ItemId,
    StateKey,
    StateValue,
}

#[derive(DeriveIden)]
enum ItemDependencies {
    Table,
    DependentItemId,
    RequiredItemId,
}

#[derive(DeriveIden)]
enum ListTags {
    Table,
    Id,
    Name,
    Color,
}

#[derive(DeriveIden)]
enum ListTagAssignments {
    Table,
    ListId,
    TagId,
}

#[derive(DeriveIden)]
enum ListProperties {
    Table,
    ListId,
    Key,
    Value,
}

#[derive(DeriveIden)]
enum ItemProperties {
    Table,
    ItemId,
    Key,
    Value,
}

#[derive(DeriveIden)]
enum History {
    Table,
    Id,
    EntityType,
    EntityId,
    Action,
    OldValue,
    NewValue,
    Actor,
    Timestamp,
}
