use sea_orm::*;
use uuid::Uuid;

use super::provided;
use crate::error::{AppError, AppResult};
use crate::models::deals::{self, CreateDeal, DEFAULT_CURRENCY, DealFilter, UpdateDeal};
use crate::models::{brands, categories};
use crate::pagination::{Paginated, PaginationArgs};

/// Insert a new deal.
pub async fn insert_deal(db: &DatabaseConnection, input: CreateDeal) -> AppResult<deals::Model> {
    let title = input.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::InvalidArgument("title must not be empty".to_string()));
    }
    validate_prices(input.price, input.original_price)?;
    ensure_references(db, input.brand_id, input.category_id).await?;

    let new_deal = deals::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        description: Set(input.description),
        price: Set(input.price),
        original_price: Set(input.original_price),
        currency: Set(normalize_currency(input.currency.as_deref())?),
        url: Set(input.url),
        image_url: Set(input.image_url),
        brand_id: Set(input.brand_id),
        category_id: Set(input.category_id),
        expires_at: Set(input.expires_at),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok(new_deal.insert(db).await?)
}

/// Build the filtered, newest-first query behind the deal listings.
pub fn filtered_select(filter: &DealFilter, now: chrono::DateTime<chrono::Utc>) -> Select<deals::Entity> {
    let mut select = deals::Entity::find();

    if let Some(brand_id) = filter.brand_id {
        select = select.filter(deals::Column::BrandId.eq(brand_id));
    }
    if let Some(category_id) = filter.category_id {
        select = select.filter(deals::Column::CategoryId.eq(category_id));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        let pattern = sea_query::LikeExpr::new(pattern).escape('\\');
        select = select.filter(deals::Column::Title.like(pattern));
    }
    if filter.active_only.unwrap_or(false) {
        select = select.filter(
            Condition::any()
                .add(deals::Column::ExpiresAt.is_null())
                .add(deals::Column::ExpiresAt.gt(now)),
        );
    }

    select
        .order_by_desc(deals::Column::CreatedAt)
        .order_by_desc(deals::Column::Id)
}

/// Fetch one page of deals matching `filter`.
pub async fn get_deals_paginated(
    db: &DatabaseConnection,
    filter: &DealFilter,
    args: &PaginationArgs,
) -> AppResult<Paginated<deals::Model>> {
    let select = filtered_select(filter, chrono::Utc::now());
    super::fetch_page(db, select, args).await
}

/// Fetch a single deal by ID.
pub async fn get_deal_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<deals::Model>> {
    Ok(deals::Entity::find_by_id(id).one(db).await?)
}

/// Update an existing deal.
pub async fn update_deal(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateDeal,
) -> AppResult<deals::Model> {
    let deal = deals::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Deal {id}")))?;

    let original_price = provided(input.original_price);
    validate_prices(
        input.price.unwrap_or(deal.price),
        original_price.unwrap_or(deal.original_price),
    )?;
    ensure_references(
        db,
        input.brand_id.value().copied(),
        input.category_id.value().copied(),
    )
    .await?;

    let mut active: deals::ActiveModel = deal.into();

    if let Some(title) = input.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::InvalidArgument("title must not be empty".to_string()));
        }
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(original_price) = original_price {
        active.original_price = Set(original_price);
    }
    if let Some(currency) = input.currency {
        active.currency = Set(normalize_currency(Some(&currency))?);
    }
    if let Some(url) = provided(input.url) {
        active.url = Set(url);
    }
    if let Some(image_url) = provided(input.image_url) {
        active.image_url = Set(image_url);
    }
    if let Some(brand_id) = provided(input.brand_id) {
        active.brand_id = Set(brand_id);
    }
    if let Some(category_id) = provided(input.category_id) {
        active.category_id = Set(category_id);
    }
    if let Some(expires_at) = provided(input.expires_at) {
        active.expires_at = Set(expires_at);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

/// Delete a deal by ID. Its specs go with it.
pub async fn delete_deal(db: &DatabaseConnection, id: Uuid) -> AppResult<DeleteResult> {
    Ok(deals::Entity::delete_by_id(id).exec(db).await?)
}

/// Escape `LIKE` wildcards so a search for "50%" matches the literal text.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn validate_prices(price: f64, original_price: Option<f64>) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::InvalidArgument(
            "price must be a non-negative number".to_string(),
        ));
    }
    if let Some(original) = original_price {
        if !original.is_finite() || original < 0.0 {
            return Err(AppError::InvalidArgument(
                "original price must be a non-negative number".to_string(),
            ));
        }
    }
    Ok(())
}

fn normalize_currency(currency: Option<&str>) -> AppResult<String> {
    let code = currency.map(str::trim).unwrap_or(DEFAULT_CURRENCY);
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidArgument(format!(
            "currency must be a three-letter code, got {code:?}"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

async fn ensure_references(
    db: &DatabaseConnection,
    brand_id: Option<Uuid>,
    category_id: Option<Uuid>,
) -> AppResult<()> {
    if let Some(brand_id) = brand_id {
        if brands::Entity::find_by_id(brand_id).one(db).await?.is_none() {
            return Err(AppError::InvalidArgument(format!(
                "brand {brand_id} does not exist"
            )));
        }
    }
    if let Some(category_id) = category_id {
        if categories::Entity::find_by_id(category_id).one(db).await?.is_none() {
            return Err(AppError::InvalidArgument(format!(
                "category {category_id} does not exist"
            )));
        }
    }
    Ok(())
}
