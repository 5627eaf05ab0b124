use async_graphql::MaybeUndefined;
use sea_orm::*;
use std::collections::HashSet;
use uuid::Uuid;

use super::brands::{normalize_slug, required_name};
use super::provided;
use crate::error::{AppError, AppResult};
use crate::models::categories::{self, CreateCategory, UpdateCategory};
use crate::pagination::{Paginated, PaginationArgs};

/// Insert a new category.
pub async fn insert_category(
    db: &DatabaseConnection,
    input: CreateCategory,
) -> AppResult<categories::Model> {
    let name = required_name(&input.name)?;
    let slug = normalize_slug(input.slug.as_deref().unwrap_or(&name))?;

    if let Some(parent_id) = input.parent_id {
        ensure_exists(db, parent_id).await?;
    }

    let new_category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        slug: Set(slug),
        description: Set(input.description),
        parent_id: Set(input.parent_id),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok(new_category.insert(db).await?)
}

/// Fetch one page of categories ordered by name, optionally only the direct
/// children of `parent_id`.
pub async fn get_categories_paginated(
    db: &DatabaseConnection,
    parent_id: Option<Uuid>,
    args: &PaginationArgs,
) -> AppResult<Paginated<categories::Model>> {
    let mut select = categories::Entity::find().order_by_asc(categories::Column::Name);
    if let Some(parent_id) = parent_id {
        select = select.filter(categories::Column::ParentId.eq(parent_id));
    }
    super::fetch_page(db, select, args).await
}

/// Fetch all direct children of a category.
pub async fn get_children(
    db: &DatabaseConnection,
    parent_id: Uuid,
) -> AppResult<Vec<categories::Model>> {
    Ok(categories::Entity::find()
        .filter(categories::Column::ParentId.eq(parent_id))
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await?)
}

/// Fetch a single category by ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> AppResult<Option<categories::Model>> {
    Ok(categories::Entity::find_by_id(id).one(db).await?)
}

/// Fetch a single category by slug.
pub async fn get_category_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> AppResult<Option<categories::Model>> {
    Ok(categories::Entity::find()
        .filter(categories::Column::Slug.eq(slug))
        .one(db)
        .await?)
}

/// Update an existing category.
pub async fn update_category(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateCategory,
) -> AppResult<categories::Model> {
    let category = categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {id}")))?;

    let mut active: categories::ActiveModel = category.into();

    if let Some(name) = input.name {
        active.name = Set(required_name(&name)?);
    }
    if let Some(slug) = input.slug {
        active.slug = Set(normalize_slug(&slug)?);
    }
    if let Some(description) = provided(input.description) {
        active.description = Set(description);
    }
    match input.parent_id {
        MaybeUndefined::Undefined => {}
        MaybeUndefined::Null => active.parent_id = Set(None),
        MaybeUndefined::Value(parent_id) => {
            ensure_not_descendant(db, id, parent_id).await?;
            active.parent_id = Set(Some(parent_id));
        }
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

/// Delete a category by ID. Child categories and deals are detached by the
/// `ON DELETE SET NULL` foreign keys.
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> AppResult<DeleteResult> {
    Ok(categories::Entity::delete_by_id(id).exec(db).await?)
}

/// Walk up from `parent_id` and fail if `id` is on the way, which would
/// close a loop in the tree. Every ancestor visited must exist.
async fn ensure_not_descendant(db: &DatabaseConnection, id: Uuid, parent_id: Uuid) -> AppResult<()> {
    let mut seen = HashSet::new();
    let mut current = Some(parent_id);

    while let Some(ancestor) = current {
        if ancestor == id {
            return Err(AppError::InvalidArgument(
                "a category cannot be moved under itself or one of its descendants".to_string(),
            ));
        }
        // A loop that is already stored must not hang the walk.
        if !seen.insert(ancestor) {
            break;
        }
        current = categories::Entity::find_by_id(ancestor)
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::InvalidArgument(format!("parent category {ancestor} does not exist"))
            })?
            .parent_id;
    }
    Ok(())
}

async fn ensure_exists(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
    match categories::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(AppError::InvalidArgument(format!(
            "parent category {id} does not exist"
        ))),
    }
}
