use async_graphql::{ComplexObject, Context, OutputType, Result, ResultExt, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::context::ApiContext;
use crate::cache::{cached, keys};
use crate::db::{brands as brand_db, categories as category_db, deals as deal_db, specs as spec_db};
use crate::models::{brands, categories, deals, specs, uploads};
use crate::pagination::{PageMeta, Paginated};

/// GraphQL view of [`PageMeta`]. Only built from a `PageMeta`, so the
/// navigation flags always agree with the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SimpleObject)]
#[graphql(name = "PageMeta")]
pub struct PageMetaObject {
    total: u64,
    page: u64,
    limit: u64,
    total_pages: u64,
    has_next_page: bool,
    has_previous_page: bool,
}

impl From<PageMeta> for PageMetaObject {
    fn from(meta: PageMeta) -> Self {
        Self {
            total: meta.total(),
            page: meta.page(),
            limit: meta.limit(),
            total_pages: meta.total_pages(),
            has_next_page: meta.has_next_page(),
            has_previous_page: meta.has_previous_page(),
        }
    }
}

/// One page of a list query.
#[derive(SimpleObject)]
#[graphql(concrete(name = "BrandPage", params(Brand)))]
#[graphql(concrete(name = "CategoryPage", params(Category)))]
#[graphql(concrete(name = "DealPage", params(Deal)))]
#[graphql(concrete(name = "SpecPage", params(Spec)))]
#[graphql(concrete(name = "FileUploadPage", params(FileUpload)))]
pub struct Page<T: OutputType> {
    pub items: Vec<T>,
    pub meta: PageMetaObject,
}

impl<M, T> From<Paginated<M>> for Page<T>
where
    T: OutputType + From<M>,
{
    fn from(page: Paginated<M>) -> Self {
        let page = page.map(T::from);
        Self {
            items: page.items,
            meta: page.meta.into(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<brands::Model> for Brand {
    fn from(m: brands::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            logo_url: m.logo_url,
            website_url: m.website_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<categories::Model> for Category {
    fn from(m: categories::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            parent_id: m.parent_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[ComplexObject]
impl Category {
    async fn parent(&self, ctx: &Context<'_>) -> Result<Option<Category>> {
        let Some(parent_id) = self.parent_id else {
            return Ok(None);
        };
        let api = ctx.data::<ApiContext>()?;
        let parent = cached(
            api.cache(),
            &keys::category(parent_id),
            api.cache_config.detail_ttl,
            || category_db::get_category_by_id(&api.db, parent_id),
        )
        .await
        .extend()?;
        Ok(parent.map(Category::from))
    }

    async fn children(&self, ctx: &Context<'_>) -> Result<Vec<Category>> {
        let api = ctx.data::<ApiContext>()?;
        let children = category_db::get_children(&api.db, self.id).await.extend()?;
        Ok(children.into_iter().map(Category::from).collect())
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Deal {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub currency: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[graphql(skip)]
    discount: Option<i32>,
    #[graphql(skip)]
    expired: bool,
}

impl From<deals::Model> for Deal {
    fn from(m: deals::Model) -> Self {
        let discount = m.discount_percent();
        let expired = m.is_expired_at(Utc::now());
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            price: m.price,
            original_price: m.original_price,
            currency: m.currency,
            url: m.url,
            image_url: m.image_url,
            brand_id: m.brand_id,
            category_id: m.category_id,
            expires_at: m.expires_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
            discount,
            expired,
        }
    }
}

#[ComplexObject]
impl Deal {
    /// Whole-number discount against the original price.
    async fn discount_percent(&self) -> Option<i32> {
        self.discount
    }

    async fn is_expired(&self) -> bool {
        self.expired
    }

    async fn brand(&self, ctx: &Context<'_>) -> Result<Option<Brand>> {
        let Some(brand_id) = self.brand_id else {
            return Ok(None);
        };
        let api = ctx.data::<ApiContext>()?;
        let brand = cached(
            api.cache(),
            &keys::brand(brand_id),
            api.cache_config.detail_ttl,
            || brand_db::get_brand_by_id(&api.db, brand_id),
        )
        .await
        .extend()?;
        Ok(brand.map(Brand::from))
    }

    async fn category(&self, ctx: &Context<'_>) -> Result<Option<Category>> {
        let Some(category_id) = self.category_id else {
            return Ok(None);
        };
        let api = ctx.data::<ApiContext>()?;
        let category = cached(
            api.cache(),
            &keys::category(category_id),
            api.cache_config.detail_ttl,
            || category_db::get_category_by_id(&api.db, category_id),
        )
        .await
        .extend()?;
        Ok(category.map(Category::from))
    }

    async fn specs(&self, ctx: &Context<'_>) -> Result<Vec<Spec>> {
        let api = ctx.data::<ApiContext>()?;
        let specs = spec_db::get_specs_by_deal(&api.db, self.id).await.extend()?;
        Ok(specs.into_iter().map(Spec::from).collect())
    }
}

/// Looks up a deal through the detail cache.
pub(crate) async fn load_deal(api: &ApiContext, id: Uuid) -> Result<Option<deals::Model>> {
    cached(
        api.cache(),
        &keys::deal(id),
        api.cache_config.detail_ttl,
        || deal_db::get_deal_by_id(&api.db, id),
    )
    .await
    .extend()
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Spec {
    pub id: Uuid,
    pub deal_id: Uuid,
    pub name: String,
    pub value: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<specs::Model> for Spec {
    fn from(m: specs::Model) -> Self {
        Self {
            id: m.id,
            deal_id: m.deal_id,
            name: m.name,
            value: m.value,
            position: m.position,
            created_at: m.created_at,
        }
    }
}

/// A stored file. The GraphQL `Upload` scalar is the incoming multipart part.
#[derive(Debug, Clone, SimpleObject)]
pub struct FileUpload {
    pub id: Uuid,
    pub original_name: String,
    pub content_type: String,
    pub size: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<uploads::Model> for FileUpload {
    fn from(m: uploads::Model) -> Self {
        Self {
            id: m.id,
            original_name: m.original_name,
            content_type: m.content_type,
            size: m.size,
            url: m.url,
            created_at: m.created_at,
        }
    }
}
