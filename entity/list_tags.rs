use sea_orm::entity::prelude::*;

/// A tag definition, shared across lists. Case-folded name, display color.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "list_tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::list_tag_assignments::Entity")]
    ListTagAssignments,
}

impl Related<super::list_tag_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ListTagAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
