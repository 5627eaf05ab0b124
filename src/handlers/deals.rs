use actix_web::{HttpResponse, Responder, ResponseError, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{deals as deal_db, specs as spec_db};
use crate::models::deals::DealFilter;
use crate::pagination::PaginationArgs;

#[derive(Debug, Deserialize)]
pub struct DealListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
    pub active_only: Option<bool>,
}

impl DealListQuery {
    fn split(self) -> (DealFilter, PaginationArgs) {
        (
            DealFilter {
                brand_id: self.brand_id,
                category_id: self.category_id,
                search: self.search,
                active_only: self.active_only,
            },
            PaginationArgs {
                page: self.page,
                limit: self.limit,
            },
        )
    }
}

/// GET /api/deals: one page of deals, newest first.
/// Query params: ?page=1&limit=20&brand_id=&category_id=&search=&active_only=true
pub async fn get_deals(
    db: web::Data<DatabaseConnection>,
    query: web::Query<DealListQuery>,
) -> impl Responder {
    let (filter, args) = query.into_inner().split();
    match deal_db::get_deals_paginated(db.get_ref(), &filter, &args).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/deals/{id}: a single deal.
pub async fn get_deal(db: web::Data<DatabaseConnection>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match deal_db::get_deal_by_id(db.get_ref(), id).await {
        Ok(Some(deal)) => HttpResponse::Ok().json(deal),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Deal {id} not found"),
        })),
        Err(e) => e.error_response(),
    }
}

/// GET /api/deals/{id}/specs: one page of a deal's specs.
pub async fn get_deal_specs(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationArgs>,
) -> impl Responder {
    let deal_id = path.into_inner();
    match spec_db::get_specs_paginated(db.get_ref(), deal_id, &query).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}
