use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub list_key: String,
    pub title: String,
    /// "active" | "archived"
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::todo_items::Entity")]
    TodoItems,
    #[sea_orm(has_many = "super::list_tag_assignments::Entity")]
    ListTagAssignments,
    #[sea_orm(has_many = "super::list_properties::Entity")]
    ListProperties,
}

impl Related<super::todo_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoItems.def()
    }
}

impl Related<super::list_tag_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListTagAssignments.def()
    }
}

impl Related<super::list_properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListProperties.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
