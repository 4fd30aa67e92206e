//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Product};

/// Read access to the product relation.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Lists every product in store order.
    ///
    /// Callers must not rely on the order. A row that fails to map aborts
    /// the whole call; no partial list is returned.
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;
}
