use sea_orm::entity::prelude::*;

/// Directed edge "dependent requires blocker". Endpoints may live in
/// different lists; deleting either endpoint item removes the edge.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "item_dependencies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dependent_item_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub required_item_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Dependent,
    Required,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Dependent => Entity::belongs_to(super::todo_items::Entity)
                .from(Column::DependentItemId)
                .to(super::todo_items::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Self::Required => Entity::belongs_to(super::todo_items::Entity)
                .from(Column::RequiredItemId)
                .to(super::todo_items::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
