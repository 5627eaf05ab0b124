use sea_orm::*;
use uuid::Uuid;

use super::provided;
use crate::error::{AppError, AppResult};
use crate::models::brands::{self, CreateBrand, UpdateBrand};
use crate::models::slugify;
use crate::pagination::{Paginated, PaginationArgs};

/// Insert a new brand. The slug is derived from the name when not given.
pub async fn insert_brand(db: &DatabaseConnection, input: CreateBrand) -> AppResult<brands::Model> {
    let name = required_name(&input.name)?;
    let slug = normalize_slug(input.slug.as_deref().unwrap_or(&name))?;

    let new_brand = brands::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug),
        logo_url: Set(input.logo_url),
        website_url: Set(input.website_url),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok(new_brand.insert(db).await?)
}

/// Fetch one page of brands ordered by name.
pub async fn get_brands_paginated(
    db: &DatabaseConnection,
    args: &PaginationArgs,
) -> AppResult<Paginated<brands::Model>> {
    let select = brands::Entity::find().order_by_asc(brands::Column::Name);
    super::fetch_page(db, select, args).await
}

/// Fetch a single brand by ID.
pub async fn get_brand_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<brands::Model>> {
    Ok(brands::Entity::find_by_id(id).one(db).await?)
}

/// Fetch a single brand by slug.
pub async fn get_brand_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> AppResult<Option<brands::Model>> {
    Ok(brands::Entity::find()
        .filter(brands::Column::Slug.eq(slug))
        .one(db)
        .await?)
}

/// Update an existing brand.
pub async fn update_brand(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateBrand,
) -> AppResult<brands::Model> {
    let brand = brands::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Brand {id}")))?;

    let mut active: brands::ActiveModel = brand.into();

    if let Some(name) = input.name {
        active.name = Set(required_name(&name)?);
    }
    if let Some(slug) = input.slug {
        active.slug = Set(normalize_slug(&slug)?);
    }
    if let Some(logo_url) = provided(input.logo_url) {
        active.logo_url = Set(logo_url);
    }
    if let Some(website_url) = provided(input.website_url) {
        active.website_url = Set(website_url);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

/// Delete a brand by ID. Its deals keep existing without a brand.
pub async fn delete_brand(db: &DatabaseConnection, id: Uuid) -> AppResult<DeleteResult> {
    Ok(brands::Entity::delete_by_id(id).exec(db).await?)
}

pub(crate) fn required_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidArgument("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

pub(crate) fn normalize_slug(raw: &str) -> AppResult<String> {
    let slug = slugify(raw);
    if slug.is_empty() {
        return Err(AppError::InvalidArgument(format!(
            "cannot derive a slug from {raw:?}"
        )));
    }
    Ok(slug)
}
