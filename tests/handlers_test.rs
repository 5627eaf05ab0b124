///! REST mirror tests: status codes and bodies of the `/api` routes over a
///! mock database.
///!
///! Run with: `cargo test --test handlers_test`
use actix_web::{App, http::StatusCode, test, web};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, RuntimeErr, Value};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use uuid::Uuid;

use deals_backend::handlers::init_routes;
use deals_backend::models::{brands, deals};

macro_rules! api {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db))
                .service(web::scope("/api").configure(init_routes)),
        )
        .await
    };
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

#[actix_web::test]
async fn health_is_ok() {
    let app = api!(empty_db());
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Json = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn zero_limit_is_bad_request() {
    let app = api!(empty_db());
    let req = test::TestRequest::get()
        .uri("/api/brands?page=1&limit=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Json = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("limit"));
}

#[actix_web::test]
async fn huge_page_is_bad_request() {
    let app = api!(empty_db());
    let req = test::TestRequest::get()
        .uri(&format!("/api/deals?page={}&limit=100", i64::MAX))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_deal_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<deals::Model>::new()])
        .into_connection();
    let app = api!(db);

    let req = test::TestRequest::get()
        .uri(&format!("/api/deals/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn brands_page_has_items_and_meta() {
    let brand = brands::Model {
        id: Uuid::new_v4(),
        name: "Acme".to_string(),
        slug: "acme".to_string(),
        logo_url: None,
        website_url: None,
        created_at: Utc::now(),
        updated_at: None,
    };
    let count: BTreeMap<&str, Value> = BTreeMap::from([("num_items", Value::from(1i64))]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count]])
        .append_query_results([vec![brand]])
        .into_connection();
    let app = api!(db);

    let req = test::TestRequest::get().uri("/api/brands").to_request();
    let body: Json = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"][0]["name"], "Acme");
    assert_eq!(body["meta"]["totalPages"], 1);
    assert_eq!(body["meta"]["limit"], 20);
}

#[actix_web::test]
async fn database_failure_hides_driver_message() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "relation \"brands\" does not exist".to_string(),
        ))])
        .into_connection();
    let app = api!(db);

    let req = test::TestRequest::get()
        .uri(&format!("/api/brands/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Json = test::read_body_json(resp).await;
    assert_eq!(body["error"], "internal server error");
}
