//! Dependency health reporting.

use crate::cache::CacheInterface;
use async_trait::async_trait;
use catalog_repository::DatabasePoolInterface;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Reachability of each backing dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub database: bool,
    pub cache: bool,
}

impl HealthReport {
    /// The service can answer requests as long as the store is reachable.
    /// A cache outage only degrades every read into a store query.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.database
    }
}

/// Probes the backing dependencies.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> HealthReport;
}

/// Health check against the shared database pool and cache.
pub struct DependencyHealthCheck {
    pool: Arc<dyn DatabasePoolInterface>,
    cache: Arc<dyn CacheInterface>,
}

impl DependencyHealthCheck {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { pool, cache }
    }
}

#[async_trait]
impl HealthCheck for DependencyHealthCheck {
    async fn check(&self) -> HealthReport {
        let (database, cache) = tokio::join!(self.pool.health_check(), async {
            if self.cache.is_enabled() {
                self.cache.ping().await
            } else {
                Ok(())
            }
        });

        if let Err(e) = &database {
            warn!(error = %e, "Database health check failed");
        }
        if let Err(e) = &cache {
            warn!(error = %e, "Cache health check failed");
        }

        HealthReport {
            database: database.is_ok(),
            cache: cache.is_ok(),
        }
    }
}
