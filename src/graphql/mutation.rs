use async_graphql::{Context, Object, Result, ResultExt, Upload};
use uuid::Uuid;

use super::context::ApiContext;
use super::types::{Brand, Category, Deal, FileUpload, Spec};
use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{invalidate, keys};
use crate::db::{brands as brand_db, categories as category_db, deals as deal_db, specs as spec_db};
use crate::error::{AppError, AppResult};
use crate::models::brands::{CreateBrand, UpdateBrand};
use crate::models::categories::{CreateCategory, UpdateCategory};
use crate::models::deals::{CreateDeal, UpdateDeal};
use crate::models::specs::{CreateSpec, UpdateSpec};

/// Resolves the shared context after checking the caller is an admin.
fn admin_context<'a>(ctx: &'a Context<'_>) -> Result<&'a ApiContext> {
    require_admin(ctx.data_opt::<AuthenticatedUser>()).extend()?;
    ctx.data::<ApiContext>()
}

fn deleted(rows_affected: u64, what: String) -> AppResult<bool> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(what));
    }
    Ok(true)
}

#[derive(Default)]
pub struct BrandMutation;

#[Object]
impl BrandMutation {
    async fn create_brand(&self, ctx: &Context<'_>, input: CreateBrand) -> Result<Brand> {
        let api = admin_context(ctx)?;
        let brand = brand_db::insert_brand(&api.db, input).await.extend()?;
        invalidate(api.cache(), &[keys::BRANDS_PATTERN]).await;
        Ok(brand.into())
    }

    async fn update_brand(&self, ctx: &Context<'_>, id: Uuid, input: UpdateBrand) -> Result<Brand> {
        let api = admin_context(ctx)?;
        let brand = brand_db::update_brand(&api.db, id, input).await.extend()?;
        invalidate(api.cache(), &[keys::BRANDS_PATTERN]).await;
        Ok(brand.into())
    }

    async fn delete_brand(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let api = admin_context(ctx)?;
        let result = brand_db::delete_brand(&api.db, id).await.extend()?;
        invalidate(api.cache(), &[keys::BRANDS_PATTERN, keys::DEALS_PATTERN]).await;
        deleted(result.rows_affected, format!("Brand {id}")).extend()
    }
}

#[derive(Default)]
pub struct CategoryMutation;

#[Object]
impl CategoryMutation {
    async fn create_category(&self, ctx: &Context<'_>, input: CreateCategory) -> Result<Category> {
        let api = admin_context(ctx)?;
        let category = category_db::insert_category(&api.db, input).await.extend()?;
        invalidate(api.cache(), &[keys::CATEGORIES_PATTERN]).await;
        Ok(category.into())
    }

    async fn update_category(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        input: UpdateCategory,
    ) -> Result<Category> {
        let api = admin_context(ctx)?;
        let category = category_db::update_category(&api.db, id, input)
            .await
            .extend()?;
        invalidate(api.cache(), &[keys::CATEGORIES_PATTERN]).await;
        Ok(category.into())
    }

    async fn delete_category(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let api = admin_context(ctx)?;
        let result = category_db::delete_category(&api.db, id).await.extend()?;
        invalidate(api.cache(), &[keys::CATEGORIES_PATTERN, keys::DEALS_PATTERN]).await;
        deleted(result.rows_affected, format!("Category {id}")).extend()
    }
}

#[derive(Default)]
pub struct DealMutation;

#[Object]
impl DealMutation {
    async fn create_deal(&self, ctx: &Context<'_>, input: CreateDeal) -> Result<Deal> {
        let api = admin_context(ctx)?;
        let deal = deal_db::insert_deal(&api.db, input).await.extend()?;
        invalidate(api.cache(), &[keys::DEALS_PATTERN]).await;
        Ok(deal.into())
    }

    async fn update_deal(&self, ctx: &Context<'_>, id: Uuid, input: UpdateDeal) -> Result<Deal> {
        let api = admin_context(ctx)?;
        let deal = deal_db::update_deal(&api.db, id, input).await.extend()?;
        invalidate(api.cache(), &[keys::DEALS_PATTERN]).await;
        Ok(deal.into())
    }

    async fn delete_deal(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let api = admin_context(ctx)?;
        let result = deal_db::delete_deal(&api.db, id).await.extend()?;
        invalidate(api.cache(), &[keys::DEALS_PATTERN]).await;
        deleted(result.rows_affected, format!("Deal {id}")).extend()
    }
}

#[derive(Default)]
pub struct SpecMutation;

#[Object]
impl SpecMutation {
    async fn create_spec(&self, ctx: &Context<'_>, input: CreateSpec) -> Result<Spec> {
        let api = admin_context(ctx)?;
        let spec = spec_db::insert_spec(&api.db, input).await.extend()?;
        Ok(spec.into())
    }

    async fn update_spec(&self, ctx: &Context<'_>, id: Uuid, input: UpdateSpec) -> Result<Spec> {
        let api = admin_context(ctx)?;
        let spec = spec_db::update_spec(&api.db, id, input).await.extend()?;
        Ok(spec.into())
    }

    async fn delete_spec(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let api = admin_context(ctx)?;
        let result = spec_db::delete_spec(&api.db, id).await.extend()?;
        deleted(result.rows_affected, format!("Spec {id}")).extend()
    }
}

#[derive(Default)]
pub struct UploadMutation;

#[Object]
impl UploadMutation {
    /// Store an image or PDF sent as a GraphQL multipart upload.
    async fn upload_file(&self, ctx: &Context<'_>, file: Upload) -> Result<FileUpload> {
        let api = admin_context(ctx)?;
        let value = file.value(ctx)?;
        let size = value.size()?;
        let filename = value.filename.clone();
        let content_type = value.content_type.clone();
        let content = tokio::fs::File::from_std(value.content);

        let upload = api
            .uploads
            .save(&api.db, &filename, content_type.as_deref(), size, content)
            .await
            .extend()?;
        Ok(upload.into())
    }

    async fn delete_upload(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let api = admin_context(ctx)?;
        let removed = api.uploads.remove(&api.db, id).await.extend()?;
        deleted(u64::from(removed), format!("Upload {id}")).extend()
    }
}
