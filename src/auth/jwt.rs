use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwks::JwksCache;

pub const ADMIN_ROLE: &str = "admin";

/// Bearer token claims.
///
/// `role` is the issuer's top-level role claim; providers that keep it
/// under `app_metadata` are covered too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the caller's user UUID at the issuer.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    pub iss: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub app_metadata: Option<AppMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    pub role: Option<String>,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
            || self
                .app_metadata
                .as_ref()
                .and_then(|m| m.role.as_deref())
                == Some(ADMIN_ROLE)
    }
}

/// Validate an HS256 token signed with `secret` and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|td| td.claims)
        .map_err(|e| format!("{:?}", e.kind()))
}

/// Verifies bearer tokens with whichever key source is configured.
#[derive(Clone)]
pub enum TokenVerifier {
    Secret(String),
    Jwks(JwksCache),
}

impl TokenVerifier {
    pub async fn verify(&self, token: &str) -> Result<Claims, String> {
        match self {
            TokenVerifier::Secret(secret) => validate_token(token, secret),
            TokenVerifier::Jwks(cache) => cache.validate_token(token).await.map(|td| td.claims),
        }
    }
}
