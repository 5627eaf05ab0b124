use sea_orm::DatabaseConnection;

use crate::cache::{CacheData, RedisCache};
use crate::config::CacheConfig;
use crate::uploads::UploadStore;

/// Shared state every resolver reads through `ctx.data::<ApiContext>()`.
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub cache: Option<CacheData>,
    pub cache_config: CacheConfig,
    pub uploads: UploadStore,
}

impl ApiContext {
    pub fn new(
        db: DatabaseConnection,
        cache: Option<CacheData>,
        cache_config: CacheConfig,
        uploads: UploadStore,
    ) -> Self {
        Self {
            db,
            cache,
            cache_config,
            uploads,
        }
    }

    pub fn cache(&self) -> Option<&RedisCache> {
        self.cache.as_deref()
    }
}
