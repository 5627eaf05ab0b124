use actix_web::{HttpResponse, Responder, ResponseError, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::categories as category_db;
use crate::pagination::PaginationArgs;

#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub parent_id: Option<Uuid>,
}

/// GET /api/categories: one page of categories.
/// Query params: ?page=1&limit=20&parent_id=<uuid>
pub async fn get_categories(
    db: web::Data<DatabaseConnection>,
    query: web::Query<CategoryListQuery>,
) -> impl Responder {
    let args = PaginationArgs {
        page: query.page,
        limit: query.limit,
    };
    match category_db::get_categories_paginated(db.get_ref(), query.parent_id, &args).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/categories/{id}: a single category.
pub async fn get_category(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match category_db::get_category_by_id(db.get_ref(), id).await {
        Ok(Some(category)) => HttpResponse::Ok().json(category),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Category {id} not found"),
        })),
        Err(e) => e.error_response(),
    }
}
