//! Cache interface trait for abstracted caching operations.

use crate::metrics::{CacheMetrics, MissReason};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult};
use std::time::Duration;
use tracing::{debug, warn};

/// Cache interface for storing and retrieving cached data.
///
/// Values are stored as JSON strings to keep the trait dyn-compatible.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired, and an error
    /// if the backend could not answer.
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()>;

    /// Check that the backend answers.
    async fn ping(&self) -> CatalogResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Outcome of a cache read as seen by the fetch path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The key held this payload.
    Hit(String),
    /// Nothing usable was read; the caller should go to the store.
    Miss,
}

/// Extension trait layered over [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Read a key, folding every failure into [`CacheLookup::Miss`].
    ///
    /// Absent keys, backend errors and a disabled cache all miss. The
    /// distinction is only visible in logs and in the miss counter labels.
    async fn lookup(&self, key: &str) -> CacheLookup {
        if !self.is_enabled() {
            CacheMetrics::miss(key, MissReason::Disabled);
            return CacheLookup::Miss;
        }

        match self.get_raw(key).await {
            Ok(Some(payload)) => {
                debug!("Cache hit for key '{}'", key);
                CacheMetrics::hit(key);
                CacheLookup::Hit(payload)
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                CacheMetrics::miss(key, MissReason::Absent);
                CacheLookup::Miss
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                CacheMetrics::error("get", e.error_code());
                CacheMetrics::miss(key, MissReason::Error);
                CacheLookup::Miss
            }
        }
    }

    /// Serialize a value and write it under `key` with a TTL.
    ///
    /// Serialization failures come back as [`CatalogError::Serialization`];
    /// any backend failure comes back as [`CatalogError::CacheWrite`].
    async fn store<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> CatalogResult<()> {
        let json = serde_json::to_string(value)?;

        self.set_raw(key, &json, ttl).await.map_err(|e| {
            CacheMetrics::error("set", e.error_code());
            CacheMetrics::write_failed(key);
            match e {
                CatalogError::CacheWrite(_) => e,
                other => CatalogError::CacheWrite(other.to_string()),
            }
        })
    }
}

// Blanket implementation for all CacheInterface implementations
impl<C: CacheInterface + ?Sized> CacheExt for C {}
