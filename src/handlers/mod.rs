pub mod brands;
pub mod categories;
pub mod deals;

use actix_web::{HttpResponse, Responder, web};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));

    // ── Read-only catalogue routes (public) ──
    cfg.service(web::resource("/brands").route(web::get().to(brands::get_brands)));
    cfg.service(web::resource("/brands/{id}").route(web::get().to(brands::get_brand)));

    cfg.service(web::resource("/categories").route(web::get().to(categories::get_categories)));
    cfg.service(
        web::resource("/categories/{id}").route(web::get().to(categories::get_category)),
    );

    cfg.service(
        web::scope("/deals")
            .route("", web::get().to(deals::get_deals))
            .route("/{id}", web::get().to(deals::get_deal))
            .route("/{id}/specs", web::get().to(deals::get_deal_specs)),
    );
}

/// GET /api/health: liveness check.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
