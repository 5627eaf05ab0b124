use redis::{aio::ConnectionManager, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AppResult;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with optional TTL (in seconds)
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(serialized);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    /// Delete multiple keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> redis::RedisResult<()> {
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut self.connection.clone())
            .await?;

        if !keys.is_empty() {
            let _: () = redis::cmd("DEL")
                .arg(&keys)
                .query_async(&mut self.connection.clone())
                .await?;
        }

        Ok(())
    }
}

/// Cache key generators
pub mod keys {
    use uuid::Uuid;

    use crate::pagination::PaginationArgs;

    pub const BRANDS_PATTERN: &str = "brands:*";
    pub const CATEGORIES_PATTERN: &str = "categories:*";
    pub const DEALS_PATTERN: &str = "deals:*";

    fn page(args: &PaginationArgs) -> String {
        format!(
            "p={}:l={}",
            args.page.map(|p| p.to_string()).unwrap_or_default(),
            args.limit.map(|l| l.to_string()).unwrap_or_default()
        )
    }

    /// Generate key for a page of brands
    pub fn brand_list(args: &PaginationArgs) -> String {
        format!("brands:list:{}", page(args))
    }

    /// Generate key for single brand
    pub fn brand(id: Uuid) -> String {
        format!("brands:id:{}", id)
    }

    /// Generate key for a page of categories, optionally under one parent
    pub fn category_list(parent_id: Option<Uuid>, args: &PaginationArgs) -> String {
        let parent = parent_id.map(|id| id.to_string()).unwrap_or_default();
        format!("categories:list:{}:{}", parent, page(args))
    }

    /// Generate key for single category
    pub fn category(id: Uuid) -> String {
        format!("categories:id:{}", id)
    }

    /// Generate key for a filtered page of deals
    pub fn deal_list(filters: &str, args: &PaginationArgs) -> String {
        format!("deals:list:{}:{}", filters, page(args))
    }

    /// Generate key for single deal
    pub fn deal(id: Uuid) -> String {
        format!("deals:id:{}", id)
    }
}

/// Wrapper type for Actix-web app data
pub type CacheData = Arc<RedisCache>;

/// Read-through helper: serve `key` from `cache` when present, otherwise run
/// `load` and store its result for `ttl`. Cache failures are logged and never
/// fail the request.
pub async fn cached<T, F, Fut>(
    cache: Option<&RedisCache>,
    key: &str,
    ttl: Duration,
    load: F,
) -> AppResult<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let Some(cache) = cache else {
        return load().await;
    };

    match cache.get::<T>(key).await {
        Ok(Some(hit)) => {
            debug!("cache hit for {key}");
            return Ok(hit);
        }
        Ok(None) => {}
        Err(e) => warn!("Cache error: {}", e),
    }

    let value = load().await?;
    if let Err(e) = cache.set(key, &value, Some(ttl.as_secs())).await {
        warn!("Failed to cache {key}: {}", e);
    }
    Ok(value)
}

/// Drop every key matching each of `patterns`, logging failures.
pub async fn invalidate(cache: Option<&RedisCache>, patterns: &[&str]) {
    let Some(cache) = cache else {
        return;
    };
    for pattern in patterns {
        if let Err(e) = cache.delete_pattern(pattern).await {
            warn!("Failed to invalidate {pattern}: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{cached, invalidate, keys};
    use crate::error::AppError;
    use crate::pagination::PaginationArgs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use uuid::Uuid;

    #[tokio::test]
    async fn without_cache_every_read_hits_the_loader() {
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            let value: Vec<String> = cached(None, "brands:id:x", Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["Acme".to_string()])
            })
            .await
            .unwrap();
            assert_eq!(value, vec!["Acme".to_string()]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn loader_errors_pass_through() {
        let result: Result<Option<String>, _> = cached(None, "deals:id:x", Duration::from_secs(60), || async {
            Err(AppError::NotFound("Deal x".to_string()))
        })
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalidate_without_cache_is_a_no_op() {
        invalidate(None, &[keys::BRANDS_PATTERN, keys::DEALS_PATTERN]).await;
    }

    #[test]
    fn list_keys_live_under_their_invalidation_pattern() {
        let args = PaginationArgs::new(2, 10);
        assert!(keys::brand_list(&args).starts_with("brands:"));
        assert!(keys::category_list(None, &args).starts_with("categories:"));
        assert!(keys::deal_list("b=:c=", &args).starts_with("deals:"));
        assert!(keys::deal(Uuid::nil()).starts_with("deals:"));
    }

    #[test]
    fn list_keys_differ_per_page() {
        assert_ne!(
            keys::brand_list(&PaginationArgs::new(1, 10)),
            keys::brand_list(&PaginationArgs::new(2, 10))
        );
        assert_ne!(
            keys::brand_list(&PaginationArgs::default()),
            keys::brand_list(&PaginationArgs::new(1, 20))
        );
    }
}
