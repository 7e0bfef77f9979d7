use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "todo_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub list_id: i32,
    pub parent_item_id: Option<i32>,
    pub item_key: String,
    pub content: String,
    /// "pending" | "in_progress" | "completed" | "failed"
    pub status: String,
    pub position: i32,
    pub started_at: Option<DateTime>,
    pub completed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    List,
    Parent,
    ItemProperties,
    ItemCompletionStates,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::List => Entity::belongs_to(super::lists::Entity)
                .from(Column::ListId)
                .to(super::lists::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Self::Parent => Entity::belongs_to(Entity)
                .from(Column::ParentItemId)
                .to(Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Self::ItemProperties => Entity::has_many(super::item_properties::Entity).into(),
            Self::ItemCompletionStates => {
                Entity::has_many(super::item_completion_states::Entity).into()
            }
        }
    }
}

impl Related<super::lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::List.def()
    }
}

impl Related<super::item_properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemProperties.def()
    }
}

impl Related<super::item_completion_states::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemCompletionStates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
