use async_graphql::{Context, Object, Result, ResultExt};
use uuid::Uuid;

use super::context::ApiContext;
use super::types::{Brand, Category, Deal, FileUpload, Page, Spec, load_deal};
use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{cached, keys};
use crate::db::{
    brands as brand_db, categories as category_db, deals as deal_db, specs as spec_db,
    uploads as upload_db,
};
use crate::models::deals::DealFilter;
use crate::pagination::PaginationArgs;

#[derive(Default)]
pub struct BrandQuery;

#[Object]
impl BrandQuery {
    async fn brands(
        &self,
        ctx: &Context<'_>,
        pagination: Option<PaginationArgs>,
    ) -> Result<Page<Brand>> {
        let api = ctx.data::<ApiContext>()?;
        let args = pagination.unwrap_or_default();

        let page = cached(
            api.cache(),
            &keys::brand_list(&args),
            api.cache_config.list_ttl,
            || brand_db::get_brands_paginated(&api.db, &args),
        )
        .await
        .extend()?;

        Ok(page.into())
    }

    async fn brand(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Brand>> {
        let api = ctx.data::<ApiContext>()?;
        let brand = cached(
            api.cache(),
            &keys::brand(id),
            api.cache_config.detail_ttl,
            || brand_db::get_brand_by_id(&api.db, id),
        )
        .await
        .extend()?;
        Ok(brand.map(Brand::from))
    }

    async fn brand_by_slug(&self, ctx: &Context<'_>, slug: String) -> Result<Option<Brand>> {
        let api = ctx.data::<ApiContext>()?;
        let brand = brand_db::get_brand_by_slug(&api.db, &slug).await.extend()?;
        Ok(brand.map(Brand::from))
    }
}

#[derive(Default)]
pub struct CategoryQuery;

#[Object]
impl CategoryQuery {
    /// Categories by name; with `parent_id`, only that category's children.
    async fn categories(
        &self,
        ctx: &Context<'_>,
        pagination: Option<PaginationArgs>,
        parent_id: Option<Uuid>,
    ) -> Result<Page<Category>> {
        let api = ctx.data::<ApiContext>()?;
        let args = pagination.unwrap_or_default();

        let page = cached(
            api.cache(),
            &keys::category_list(parent_id, &args),
            api.cache_config.list_ttl,
            || category_db::get_categories_paginated(&api.db, parent_id, &args),
        )
        .await
        .extend()?;

        Ok(page.into())
    }

    async fn category(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Category>> {
        let api = ctx.data::<ApiContext>()?;
        let category = cached(
            api.cache(),
            &keys::category(id),
            api.cache_config.detail_ttl,
            || category_db::get_category_by_id(&api.db, id),
        )
        .await
        .extend()?;
        Ok(category.map(Category::from))
    }

    async fn category_by_slug(&self, ctx: &Context<'_>, slug: String) -> Result<Option<Category>> {
        let api = ctx.data::<ApiContext>()?;
        let category = category_db::get_category_by_slug(&api.db, &slug)
            .await
            .extend()?;
        Ok(category.map(Category::from))
    }
}

#[derive(Default)]
pub struct DealQuery;

#[Object]
impl DealQuery {
    /// Deals newest first.
    async fn deals(
        &self,
        ctx: &Context<'_>,
        pagination: Option<PaginationArgs>,
        filter: Option<DealFilter>,
    ) -> Result<Page<Deal>> {
        let api = ctx.data::<ApiContext>()?;
        let args = pagination.unwrap_or_default();
        let filter = filter.unwrap_or_default();

        let cache = if filter.is_cacheable() { api.cache() } else { None };
        let page = cached(
            cache,
            &keys::deal_list(&filter.cache_fragment(), &args),
            api.cache_config.list_ttl,
            || deal_db::get_deals_paginated(&api.db, &filter, &args),
        )
        .await
        .extend()?;

        Ok(page.into())
    }

    async fn deal(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Deal>> {
        let api = ctx.data::<ApiContext>()?;
        Ok(load_deal(api, id).await?.map(Deal::from))
    }
}

#[derive(Default)]
pub struct SpecQuery;

#[Object]
impl SpecQuery {
    /// Specs of one deal in display order.
    async fn specs(
        &self,
        ctx: &Context<'_>,
        deal_id: Uuid,
        pagination: Option<PaginationArgs>,
    ) -> Result<Page<Spec>> {
        let api = ctx.data::<ApiContext>()?;
        let args = pagination.unwrap_or_default();
        let page = spec_db::get_specs_paginated(&api.db, deal_id, &args)
            .await
            .extend()?;
        Ok(page.into())
    }

    async fn spec(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Spec>> {
        let api = ctx.data::<ApiContext>()?;
        let spec = spec_db::get_spec_by_id(&api.db, id).await.extend()?;
        Ok(spec.map(Spec::from))
    }
}

#[derive(Default)]
pub struct UploadQuery;

#[Object]
impl UploadQuery {
    /// Stored files, newest first. Admin only.
    async fn uploads(
        &self,
        ctx: &Context<'_>,
        pagination: Option<PaginationArgs>,
    ) -> Result<Page<FileUpload>> {
        require_admin(ctx.data_opt::<AuthenticatedUser>()).extend()?;
        let api = ctx.data::<ApiContext>()?;
        let args = pagination.unwrap_or_default();
        let page = upload_db::get_uploads_paginated(&api.db, &args)
            .await
            .extend()?;
        Ok(page.into())
    }
}
