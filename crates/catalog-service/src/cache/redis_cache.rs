//! Redis-based cache implementation.

use super::CacheInterface;
use crate::timeout::with_timeout;
use async_trait::async_trait;
use catalog_config::RedisConfig;
use catalog_core::{CatalogError, CatalogResult};
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default upper bound for a single cache operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-based cache service.
///
/// Every operation, including checking a connection out of the pool, is
/// bounded by `operation_timeout` so a degraded backend cannot stall a
/// request.
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
    operation_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Create a cache service with a custom operation timeout.
    #[must_use]
    pub fn with_timeout(pool: Arc<Pool>, operation_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            operation_timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Build the service from configuration.
    ///
    /// Connections are opened lazily, so an unreachable Redis does not
    /// prevent startup.
    pub fn from_config(config: &RedisConfig) -> CatalogResult<Self> {
        if !config.enabled {
            info!("Redis cache disabled; every lookup will miss");
            return Ok(Self::disabled());
        }

        let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
        redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CatalogError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        info!("Redis cache pool created for {}", config.url);
        Ok(Self::with_timeout(Arc::new(pool), config.operation_timeout()))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CatalogError::CacheUnavailable(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CatalogError::CacheUnavailable("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        with_timeout(self.operation_timeout, "cache GET", move || async move {
            let mut conn = self.get_conn().await?;
            let value: Option<String> = conn.get(key).await.map_err(|e| {
                CatalogError::CacheUnavailable(format!("Failed to get key '{}': {}", key, e))
            })?;
            Ok(value)
        })
        .await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let ttl_secs = ttl.as_secs().max(1);

        with_timeout(self.operation_timeout, "cache SET", move || async move {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
                CatalogError::CacheWrite(format!("Failed to set key '{}': {}", key, e))
            })
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn ping(&self) -> CatalogResult<()> {
        with_timeout(self.operation_timeout, "cache PING", move || async move {
            let mut conn = self.get_conn().await?;
            let _: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| CatalogError::CacheUnavailable(format!("PING failed: {}", e)))?;
            Ok(())
        })
        .await
    }
}
