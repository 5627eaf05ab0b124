///! Wire shape of page metadata as seen by REST and GraphQL clients.
///!
///! Run with: `cargo test --test pagination_test`
use deals_backend::graphql::build_schema;
use deals_backend::graphql::types::PageMetaObject;
use deals_backend::{PageMeta, Paginated, PaginationError};
use serde_json::json;

#[test]
fn page_meta_serializes_with_exact_field_names() {
    let meta = PageMeta::new(95, 1, 10).unwrap();

    assert_eq!(
        serde_json::to_value(meta).unwrap(),
        json!({
            "total": 95,
            "page": 1,
            "limit": 10,
            "totalPages": 10,
            "hasNextPage": true,
            "hasPreviousPage": false,
        })
    );
}

#[test]
fn deserializing_recomputes_derived_fields() {
    let tampered = json!({
        "total": 100,
        "page": 11,
        "limit": 10,
        "totalPages": 42,
        "hasNextPage": true,
        "hasPreviousPage": false,
    });

    let meta: PageMeta = serde_json::from_value(tampered).unwrap();
    assert_eq!(meta, PageMeta::new(100, 11, 10).unwrap());
    assert_eq!(meta.total_pages(), 10);
    assert!(!meta.has_next_page());
    assert!(meta.has_previous_page());
}

#[test]
fn deserializing_zero_limit_fails() {
    let result = serde_json::from_value::<PageMeta>(json!({ "total": 3, "page": 1, "limit": 0 }));
    assert!(result.is_err());
}

#[test]
fn zero_limit_is_invalid_argument() {
    assert!(matches!(
        PageMeta::new(10, 1, 0),
        Err(PaginationError::InvalidArgument(_))
    ));
}

#[test]
fn paginated_envelope_shape() {
    let page = Paginated::new(vec!["a", "b"], PageMeta::new(2, 1, 20).unwrap());
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(value["items"], json!(["a", "b"]));
    assert_eq!(value["meta"]["totalPages"], json!(1));
    assert_eq!(value["meta"]["hasNextPage"], json!(false));
}

#[test]
fn paginated_map_keeps_meta() {
    let meta = PageMeta::new(3, 1, 2).unwrap();
    let page = Paginated::new(vec![1, 2], meta).map(|n| n * 10);
    assert_eq!(page.items, vec![10, 20]);
    assert_eq!(page.meta, meta);
}

#[test]
fn graphql_object_mirrors_page_meta() {
    let object = PageMetaObject::from(PageMeta::new(0, 2, 10).unwrap());
    let debug = format!("{object:?}");
    assert!(debug.contains("total_pages: 0"));
    assert!(debug.contains("has_next_page: false"));
    assert!(debug.contains("has_previous_page: true"));
    assert_eq!(object, PageMetaObject::from(PageMeta::new(0, 2, 10).unwrap()));
}

#[test]
fn graphql_schema_exposes_page_meta_fields_verbatim() {
    let sdl = build_schema().finish().sdl();

    let start = sdl.find("type PageMeta {").expect("PageMeta type in schema");
    let end = start + sdl[start..].find('}').unwrap();
    let body = &sdl[start..end];

    for field in [
        "total: Int!",
        "page: Int!",
        "limit: Int!",
        "totalPages: Int!",
        "hasNextPage: Boolean!",
        "hasPreviousPage: Boolean!",
    ] {
        assert!(body.contains(field), "missing {field} in {body}");
    }

    for page_type in ["type BrandPage", "type CategoryPage", "type DealPage", "type SpecPage", "type FileUploadPage"] {
        assert!(sdl.contains(page_type), "missing {page_type}");
    }
}
