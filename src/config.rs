use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_UPLOAD_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// How bearer tokens are verified.
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// HS256 shared secret.
    Secret(String),
    /// ES256/ES384 keys published at a JWKS endpoint.
    Jwks { url: String, api_key: Option<String> },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub auth: AuthConfig,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub upload_max_bytes: u64,
    pub public_base_url: String,
    pub run_migrations: bool,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = required("DATABASE_URL")?;

        let auth = match (optional("JWT_SECRET"), optional("JWKS_URL")) {
            (Some(secret), _) => AuthConfig::Secret(secret),
            (None, Some(url)) => AuthConfig::Jwks {
                url,
                api_key: optional("JWKS_API_KEY"),
            },
            (None, None) => {
                return Err(AppError::Config(
                    "either JWT_SECRET or JWKS_URL must be set".to_string(),
                ));
            }
        };

        let port = match optional("PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| AppError::Config(format!("invalid PORT {p:?}: {e}")))?,
            None => 8080,
        };

        let public_base_url = optional("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            redis_url: optional("REDIS_URL"),
            auth,
            port,
            upload_dir: optional("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./uploads")),
            upload_max_bytes: parse_or("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES),
            public_base_url,
            run_migrations: parse_bool("RUN_MIGRATIONS", true),
            cache: CacheConfig::from_env(),
        })
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub list_ttl: Duration,
    pub detail_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_ttl: Duration::from_secs(300),   // 5 minutes
            detail_ttl: Duration::from_secs(600), // 10 minutes
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            list_ttl: Duration::from_secs(parse_or("CACHE_TTL_LISTS", 300)),
            detail_ttl: Duration::from_secs(parse_or("CACHE_TTL_DETAIL", 600)),
        }
    }
}

fn required(name: &str) -> Result<String, AppError> {
    optional(name).ok_or_else(|| AppError::Config(format!("{name} must be set")))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or(name: &str, default: u64) -> u64 {
    optional(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_bool(name: &str, default: bool) -> bool {
    match optional(name).map(|v| v.to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
