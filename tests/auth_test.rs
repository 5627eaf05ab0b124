///! Integration test for bearer token validation and the admin check.
///!
///! Tokens are minted locally with the same HS256 secret the server would be
///! configured with. No running server or database is needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use deals_backend::auth::authorization::require_admin;
use deals_backend::auth::jwt::{AppMetadata, Claims, TokenVerifier, validate_token};
use deals_backend::auth::middleware::AuthenticatedUser;

/// A fake secret for testing, never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn claims(sub: &str, role: Option<&str>) -> Claims {
    let now = Utc::now().timestamp() as usize;
    Claims {
        sub: sub.to_string(),
        exp: now + 3600, // 1 hour from now
        iat: Some(now),
        iss: Some("https://auth.example.com".to_string()),
        email: Some("alice@example.com".to_string()),
        role: role.map(str::to_string),
        app_metadata: None,
    }
}

/// Helper: sign claims with HS256 using the test secret.
fn mint(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[test]
fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let token = mint(&claims(&user_id.to_string(), Some("admin")));

    let decoded = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(decoded.sub, user_id.to_string());
    assert_eq!(decoded.email.as_deref(), Some("alice@example.com"));
    assert_eq!(decoded.user_id().unwrap(), user_id);
    assert!(decoded.is_admin());
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;
    let mut expired = claims(&Uuid::new_v4().to_string(), None);
    expired.exp = now - 300; // well past the 60s default leeway
    expired.iat = Some(now - 3600);

    let result = validate_token(&mint(&expired), TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint(&claims(&Uuid::new_v4().to_string(), None));

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(validate_token("not.a.valid.jwt", TEST_SECRET).is_err());
}

#[tokio::test]
async fn test_secret_verifier_matches_validate_token() {
    let token = mint(&claims(&Uuid::new_v4().to_string(), Some("authenticated")));
    let verifier = TokenVerifier::Secret(TEST_SECRET.to_string());

    let decoded = verifier.verify(&token).await.expect("Token should be valid");
    assert_eq!(decoded.role.as_deref(), Some("authenticated"));
    assert!(!decoded.is_admin());
}

#[test]
fn test_admin_role_from_app_metadata() {
    let mut c = claims(&Uuid::new_v4().to_string(), Some("authenticated"));
    assert!(!c.is_admin());

    c.app_metadata = Some(AppMetadata {
        role: Some("admin".to_string()),
    });
    assert!(c.is_admin());
}

#[test]
fn test_require_admin() {
    let anonymous = require_admin(None).unwrap_err();
    assert_eq!(anonymous.code(), "UNAUTHENTICATED");

    let shopper = AuthenticatedUser(claims(&Uuid::new_v4().to_string(), None));
    assert_eq!(require_admin(Some(&shopper)).unwrap_err().code(), "FORBIDDEN");

    let admin = AuthenticatedUser(claims(&Uuid::new_v4().to_string(), Some("admin")));
    assert!(require_admin(Some(&admin)).is_ok());
}
