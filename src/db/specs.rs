use sea_orm::*;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{deals, specs::{self, CreateSpec, UpdateSpec}};
use crate::pagination::{Paginated, PaginationArgs};

/// Insert a spec for an existing deal. Without an explicit position the spec
/// is appended after the deal's current last one.
pub async fn insert_spec(db: &DatabaseConnection, input: CreateSpec) -> AppResult<specs::Model> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::InvalidArgument("spec name must not be empty".to_string()));
    }
    if deals::Entity::find_by_id(input.deal_id).one(db).await?.is_none() {
        return Err(AppError::NotFound(format!("Deal {}", input.deal_id)));
    }

    let position = match input.position {
        Some(p) => p,
        None => next_position(db, input.deal_id).await?,
    };

    let new_spec = specs::ActiveModel {
        id: Set(Uuid::new_v4()),
        deal_id: Set(input.deal_id),
        name: Set(name),
        value: Set(input.value),
        position: Set(position),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_spec.insert(db).await?)
}

/// Fetch one page of a deal's specs in display order.
pub async fn get_specs_paginated(
    db: &DatabaseConnection,
    deal_id: Uuid,
    args: &PaginationArgs,
) -> AppResult<Paginated<specs::Model>> {
    let select = specs::Entity::find()
        .filter(specs::Column::DealId.eq(deal_id))
        .order_by_asc(specs::Column::Position)
        .order_by_asc(specs::Column::CreatedAt);
    super::fetch_page(db, select, args).await
}

/// Fetch every spec of a deal in display order.
pub async fn get_specs_by_deal(db: &DatabaseConnection, deal_id: Uuid) -> AppResult<Vec<specs::Model>> {
    Ok(specs::Entity::find()
        .filter(specs::Column::DealId.eq(deal_id))
        .order_by_asc(specs::Column::Position)
        .order_by_asc(specs::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Fetch a single spec by ID.
pub async fn get_spec_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<specs::Model>> {
    Ok(specs::Entity::find_by_id(id).one(db).await?)
}

/// Update an existing spec.
pub async fn update_spec(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateSpec,
) -> AppResult<specs::Model> {
    let spec = specs::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Spec {id}")))?;

    let mut active: specs::ActiveModel = spec.into();

    if let Some(name) = input.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::InvalidArgument("spec name must not be empty".to_string()));
        }
        active.name = Set(name);
    }
    if let Some(value) = input.value {
        active.value = Set(value);
    }
    if let Some(position) = input.position {
        active.position = Set(position);
    }

    Ok(active.update(db).await?)
}

/// Delete a spec by ID.
pub async fn delete_spec(db: &DatabaseConnection, id: Uuid) -> AppResult<DeleteResult> {
    Ok(specs::Entity::delete_by_id(id).exec(db).await?)
}

async fn next_position(db: &DatabaseConnection, deal_id: Uuid) -> AppResult<i32> {
    let last = specs::Entity::find()
        .filter(specs::Column::DealId.eq(deal_id))
        .order_by_desc(specs::Column::Position)
        .one(db)
        .await?;
    Ok(last.map(|s| s.position + 1).unwrap_or(0))
}
