use sea_orm::*;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::uploads::{self, NewUpload};
use crate::pagination::{Paginated, PaginationArgs};

/// Record a stored file.
pub async fn insert_upload(db: &DatabaseConnection, input: NewUpload) -> AppResult<uploads::Model> {
    let new_upload = uploads::ActiveModel {
        id: Set(Uuid::new_v4()),
        original_name: Set(input.original_name),
        stored_name: Set(input.stored_name),
        content_type: Set(input.content_type),
        size: Set(input.size),
        url: Set(input.url),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_upload.insert(db).await?)
}

/// Fetch one page of uploads, newest first.
pub async fn get_uploads_paginated(
    db: &DatabaseConnection,
    args: &PaginationArgs,
) -> AppResult<Paginated<uploads::Model>> {
    let select = uploads::Entity::find().order_by_desc(uploads::Column::CreatedAt);
    super::fetch_page(db, select, args).await
}

/// Fetch a single upload by ID.
pub async fn get_upload_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<uploads::Model>> {
    Ok(uploads::Entity::find_by_id(id).one(db).await?)
}

/// Delete an upload record by ID.
pub async fn delete_upload(db: &DatabaseConnection, id: Uuid) -> AppResult<DeleteResult> {
    Ok(uploads::Entity::delete_by_id(id).exec(db).await?)
}
