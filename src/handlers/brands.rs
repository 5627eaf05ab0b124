use actix_web::{HttpResponse, Responder, ResponseError, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::brands as brand_db;
use crate::pagination::PaginationArgs;

/// GET /api/brands: one page of brands. Query params: ?page=1&limit=20
pub async fn get_brands(
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationArgs>,
) -> impl Responder {
    match brand_db::get_brands_paginated(db.get_ref(), &query).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/brands/{id}: a single brand.
pub async fn get_brand(db: web::Data<DatabaseConnection>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match brand_db::get_brand_by_id(db.get_ref(), id).await {
        Ok(Some(brand)) => HttpResponse::Ok().json(brand),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Brand {id} not found"),
        })),
        Err(e) => e.error_response(),
    }
}
