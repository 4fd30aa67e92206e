//! Cache-aside product service implementation.

use crate::cache::{CacheExt, CacheInterface, CacheLookup};
use crate::metrics::CacheMetrics;
use crate::product_service::ProductService;
use async_trait::async_trait;
use catalog_config::{CacheConfig, WriteFailurePolicy};
use catalog_core::{CatalogError, CatalogResult, FetchedProducts, Product};
use catalog_repository::ProductRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Key, expiration and write-failure handling for the cached product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub key: String,
    pub ttl: Duration,
    pub write_failure_policy: WriteFailurePolicy,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            key: config.key.clone(),
            ttl: config.ttl(),
            write_failure_policy: config.write_failure_policy,
        }
    }
}

/// Product service reading through the cache to the store.
pub struct ProductServiceImpl {
    cache: Arc<dyn CacheInterface>,
    repository: Arc<dyn ProductRepository>,
    settings: CacheSettings,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        cache: Arc<dyn CacheInterface>,
        repository: Arc<dyn ProductRepository>,
        settings: CacheSettings,
    ) -> Self {
        info!(
            key = %settings.key,
            ttl_secs = settings.ttl.as_secs(),
            write_failure_policy = %settings.write_failure_policy,
            "Product service configured"
        );
        Self {
            cache,
            repository,
            settings,
        }
    }

    fn decode(&self, payload: &str) -> CatalogResult<Vec<Product>> {
        serde_json::from_str(payload).map_err(|e| {
            error!(key = %self.settings.key, error = %e, "Cached product list is corrupt");
            CatalogError::CacheCorrupt(e.to_string())
        })
    }

    async fn load_from_store(&self) -> CatalogResult<Vec<Product>> {
        match self.repository.list_products().await {
            Ok(products) => {
                CacheMetrics::store_query(true);
                Ok(products)
            }
            Err(e) => {
                CacheMetrics::store_query(false);
                error!(error = %e, "Failed to list products from store");
                Err(e)
            }
        }
    }

    /// JSON has no encoding for NaN or infinity, so such a price cannot be
    /// cached or served without losing the field.
    fn ensure_encodable(products: &[Product]) -> CatalogResult<()> {
        match products.iter().find(|p| !p.retail_price.is_finite()) {
            Some(product) => {
                error!(
                    product_id = %product.product_id,
                    retail_price = %product.retail_price,
                    "Product price cannot be encoded"
                );
                Err(CatalogError::Serialization(format!(
                    "product '{}' has non-finite retail price {}",
                    product.product_id, product.retail_price
                )))
            }
            None => Ok(()),
        }
    }

    async fn populate(&self, products: &[Product]) -> CatalogResult<()> {
        let key = &self.settings.key;

        match self.cache.store(key, &products, self.settings.ttl).await {
            Ok(()) => Ok(()),
            Err(e @ CatalogError::Serialization(_)) => Err(e),
            Err(e) => match self.settings.write_failure_policy {
                WriteFailurePolicy::Fail => {
                    error!(key = %key, error = %e, "Failed to populate cache");
                    Err(e)
                }
                WriteFailurePolicy::Ignore => {
                    warn!(key = %key, error = %e, "Failed to populate cache, serving store data");
                    Ok(())
                }
            },
        }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn fetch_products(&self) -> CatalogResult<FetchedProducts> {
        if let CacheLookup::Hit(payload) = self.cache.lookup(&self.settings.key).await {
            let products = self.decode(&payload)?;
            debug!("Serving {} products from cache", products.len());
            return Ok(FetchedProducts::from_cache(products));
        }

        let products = self.load_from_store().await?;
        Self::ensure_encodable(&products)?;
        self.populate(&products).await?;

        debug!("Serving {} products from database", products.len());
        Ok(FetchedProducts::from_database(products))
    }
}
