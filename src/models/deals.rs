use async_graphql::MaybeUndefined;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `deals` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub original_price: Option<f64>,
    pub currency: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub expires_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl Model {
    /// Whole-number discount against `original_price`, when there is one.
    pub fn discount_percent(&self) -> Option<i32> {
        match self.original_price {
            Some(original) if original > self.price && self.price > 0.0 => {
                Some((((original - self.price) / original) * 100.0).round() as i32)
            }
            _ => None,
        }
    }

    pub fn is_expired_at(&self, now: DateTimeUtc) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brands::Entity",
        from = "Column::BrandId",
        to = "super::brands::Column::Id",
        on_delete = "SetNull"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::specs::Entity")]
    Specs,
}

impl Related<super::brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::specs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Specs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Deserialize, async_graphql::InputObject)]
pub struct CreateDeal {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub currency: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub expires_at: Option<DateTimeUtc>,
}

/// Partial update. Send `null` for a nullable field to clear it, e.g.
/// `expiresAt: null` makes the deal open-ended.
#[derive(Debug, Clone, Default, Deserialize, async_graphql::InputObject)]
#[serde(default)]
pub struct UpdateDeal {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: MaybeUndefined<f64>,
    pub currency: Option<String>,
    pub url: MaybeUndefined<String>,
    pub image_url: MaybeUndefined<String>,
    pub brand_id: MaybeUndefined<Uuid>,
    pub category_id: MaybeUndefined<Uuid>,
    pub expires_at: MaybeUndefined<DateTimeUtc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, async_graphql::InputObject)]
pub struct DealFilter {
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Substring match against the title.
    pub search: Option<String>,
    /// Skip deals whose `expires_at` has passed.
    pub active_only: Option<bool>,
}

impl DealFilter {
    /// Active-only listings change as deals expire, so they always go to
    /// the database.
    pub fn is_cacheable(&self) -> bool {
        !self.active_only.unwrap_or(false)
    }

    /// Stable fragment used in cache keys.
    pub fn cache_fragment(&self) -> String {
        format!(
            "b={}:c={}:q={}:a={}",
            self.brand_id.map(|id| id.to_string()).unwrap_or_default(),
            self.category_id.map(|id| id.to_string()).unwrap_or_default(),
            self.search.as_deref().unwrap_or_default().trim(),
            self.active_only.unwrap_or(false),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn deal(price: f64, original_price: Option<f64>) -> Model {
        Model {
            id: Uuid::new_v4(),
            title: "Headphones".to_string(),
            description: "Noise cancelling".to_string(),
            price,
            original_price,
            currency: DEFAULT_CURRENCY.to_string(),
            url: None,
            image_url: None,
            brand_id: None,
            category_id: None,
            expires_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn discount_is_rounded_percentage() {
        assert_eq!(deal(75.0, Some(100.0)).discount_percent(), Some(25));
        assert_eq!(deal(66.5, Some(100.0)).discount_percent(), Some(34));
    }

    #[test]
    fn no_discount_without_cheaper_price() {
        assert_eq!(deal(100.0, None).discount_percent(), None);
        assert_eq!(deal(100.0, Some(100.0)).discount_percent(), None);
        assert_eq!(deal(120.0, Some(100.0)).discount_percent(), None);
        assert_eq!(deal(0.0, Some(100.0)).discount_percent(), None);
    }

    #[test]
    fn expiry_is_inclusive() {
        let now = Utc::now();
        let mut d = deal(10.0, None);
        assert!(!d.is_expired_at(now));
        d.expires_at = Some(now);
        assert!(d.is_expired_at(now));
        d.expires_at = Some(now + Duration::hours(1));
        assert!(!d.is_expired_at(now));
    }

    #[test]
    fn update_tells_null_from_absent() {
        let clear: UpdateDeal = serde_json::from_value(serde_json::json!({ "expires_at": null })).unwrap();
        assert!(clear.expires_at.is_null());
        assert!(clear.brand_id.is_undefined());

        let keep: UpdateDeal = serde_json::from_value(serde_json::json!({ "title": "TV" })).unwrap();
        assert!(keep.expires_at.is_undefined());
        assert_eq!(keep.title.as_deref(), Some("TV"));
    }

    #[test]
    fn active_only_listings_bypass_the_cache() {
        assert!(DealFilter::default().is_cacheable());
        let active = DealFilter {
            active_only: Some(true),
            ..Default::default()
        };
        assert!(!active.is_cacheable());
    }

    #[test]
    fn filter_fragment_trims_search() {
        let a = DealFilter {
            search: Some("  TV ".to_string()),
            ..Default::default()
        };
        let b = DealFilter {
            search: Some("TV".to_string()),
            ..Default::default()
        };
        assert_eq!(a.cache_fragment(), b.cache_fragment());
    }
}
