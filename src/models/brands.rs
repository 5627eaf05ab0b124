use async_graphql::MaybeUndefined;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `brands` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deals::Entity")]
    Deals,
}

impl Related<super::deals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize, async_graphql::InputObject)]
pub struct CreateBrand {
    pub name: String,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
}

/// Partial update. Nullable fields distinguish "leave as is" (absent) from
/// "clear" (explicit `null`).
#[derive(Debug, Clone, Default, Deserialize, async_graphql::InputObject)]
#[serde(default)]
pub struct UpdateBrand {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo_url: MaybeUndefined<String>,
    pub website_url: MaybeUndefined<String>,
}
