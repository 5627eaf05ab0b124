use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `specs` table: name/value pairs attached to a deal,
/// shown in `position` order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "specs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub deal_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub position: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::deals::Entity",
        from = "Column::DealId",
        to = "super::deals::Column::Id",
        on_delete = "Cascade"
    )]
    Deal,
}

impl Related<super::deals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, async_graphql::InputObject)]
pub struct CreateSpec {
    pub deal_id: Uuid,
    pub name: String,
    pub value: String,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, async_graphql::InputObject)]
pub struct UpdateSpec {
    pub name: Option<String>,
    pub value: Option<String>,
    pub position: Option<i32>,
}
