///! Data-access tests against SeaORM's mock connection.
///!
///! Run with: `cargo test --test db_test`
use async_graphql::MaybeUndefined;
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use deals_backend::PaginationArgs;
use deals_backend::db::{
    brands as brand_db, categories as category_db, deals as deal_db, specs as spec_db,
};
use deals_backend::error::AppError;
use deals_backend::models::categories::UpdateCategory;
use deals_backend::models::deals::UpdateDeal;
use deals_backend::models::specs::CreateSpec;
use deals_backend::models::{brands, categories, deals, uploads};
use deals_backend::uploads::UploadStore;

fn brand(name: &str) -> brands::Model {
    brands::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase(),
        logo_url: None,
        website_url: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn deal(title: &str) -> deals::Model {
    deals::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: "Limited time offer".to_string(),
        price: 49.99,
        original_price: Some(99.99),
        currency: "USD".to_string(),
        url: None,
        image_url: None,
        brand_id: None,
        category_id: None,
        expires_at: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn category(name: &str, parent_id: Option<Uuid>) -> categories::Model {
    categories::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: None,
        parent_id,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(n))])
}

#[tokio::test]
async fn get_deal_by_id_returns_row() {
    let expected = deal("Laptop");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![expected.clone()]])
        .into_connection();

    let found = deal_db::get_deal_by_id(&db, expected.id).await.unwrap();
    assert_eq!(found, Some(expected));
}

#[tokio::test]
async fn brands_page_carries_meta() {
    let rows = vec![brand("Acme"), brand("Globex")];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(12)]])
        .append_query_results([rows.clone()])
        .into_connection();

    let page = brand_db::get_brands_paginated(&db, &PaginationArgs::new(1, 10))
        .await
        .unwrap();

    assert_eq!(page.items, rows);
    assert_eq!(page.meta.total(), 12);
    assert_eq!(page.meta.total_pages(), 2);
    assert!(page.meta.has_next_page());
    assert!(!page.meta.has_previous_page());
}

#[tokio::test]
async fn zero_limit_fails_before_querying() {
    // No results queued: any query would fail with a database error instead.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = brand_db::get_brands_paginated(&db, &PaginationArgs::new(1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn delete_reports_rows_affected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let result = deal_db::delete_deal(&db, Uuid::new_v4()).await.unwrap();
    assert_eq!(result.rows_affected, 1);
}

#[tokio::test]
async fn spec_for_missing_deal_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<deals::Model>::new()])
        .into_connection();

    let err = spec_db::insert_spec(
        &db,
        CreateSpec {
            deal_id: Uuid::new_v4(),
            name: "Weight".to_string(),
            value: "1.2 kg".to_string(),
            position: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn brand_with_unsluggable_name_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = brand_db::insert_brand(
        &db,
        brands::CreateBrand {
            name: "!!!".to_string(),
            slug: None,
            logo_url: None,
            website_url: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn page_beyond_offset_range_is_rejected() {
    // Nothing queued: the request must fail before reaching the database.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = brand_db::get_brands_paginated(&db, &PaginationArgs::new(i64::MAX, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn explicit_null_clears_deal_expiry() {
    let mut existing = deal("Monitor");
    existing.expires_at = Some(Utc::now());
    let mut updated = existing.clone();
    updated.expires_at = None;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing.clone()]])
        .append_query_results([vec![updated.clone()]])
        .into_connection();

    let result = deal_db::update_deal(
        &db,
        existing.id,
        UpdateDeal {
            expires_at: MaybeUndefined::Null,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(result.expires_at, None);

    let log = db.into_transaction_log();
    let update = &log[1].statements()[0];
    assert!(update.sql.starts_with(r#"UPDATE "deals" SET"#));
    assert!(update.sql.contains(r#""expires_at" = $"#));
    assert!(!update.sql.contains(r#""brand_id" = $"#));
    let values = &update.values.as_ref().unwrap().0;
    assert!(values.contains(&Value::ChronoDateTimeUtc(None)));
}

#[tokio::test]
async fn category_cannot_move_under_its_descendant() {
    let parent = category("Electronics", None);
    let child = category("Audio", Some(parent.id));

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![parent.clone()]])
        .append_query_results([vec![child.clone()]])
        .into_connection();

    let err = category_db::update_category(
        &db,
        parent.id,
        UpdateCategory {
            parent_id: MaybeUndefined::Value(child.id),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn stored_extension_follows_content_type_not_file_name() {
    let dir = std::env::temp_dir().join(format!("deals-uploads-{}", Uuid::new_v4()));
    let store = UploadStore::new(&dir, 1024, "http://localhost:8080");
    store.ensure_dir().await.unwrap();

    let row = uploads::Model {
        id: Uuid::new_v4(),
        original_name: "payload.html".to_string(),
        stored_name: "ignored.png".to_string(),
        content_type: "image/png".to_string(),
        size: 4,
        url: "http://localhost:8080/uploads/ignored.png".to_string(),
        created_at: Utc::now(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let content: &[u8] = b"\x89PNG";
    store
        .save(&db, "payload.html", Some("image/png"), 4, content)
        .await
        .unwrap();

    let mut files = std::fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect::<Vec<_>>();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(files.len(), 1);
    let stored = files.pop().unwrap();
    assert!(stored.ends_with(".png"), "stored as {stored}");

    let insert = &db.into_transaction_log()[0];
    let values = &insert.statements()[0].values.as_ref().unwrap().0;
    assert!(values.contains(&Value::from(stored)));
    assert!(values.contains(&Value::from("payload.html".to_string())));
}
