use sea_orm::entity::prelude::*;

/// Append-only mutation log. `entity_type`/`entity_id` is polymorphic
/// (list or item) and intentionally carries no foreign key: the owning
/// row may already be gone by the time history is inspected for a
/// completed cascade delete.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// "list" | "item"
    pub entity_type: String,
    pub entity_id: i32,
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub actor: Option<String>,
    pub timestamp: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
