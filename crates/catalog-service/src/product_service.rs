//! Product service trait.

use async_trait::async_trait;
use catalog_core::{CatalogResult, FetchedProducts};

/// Read-through access to the product list.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Returns the product list and the tier it was served from.
    ///
    /// A cache hit never touches the store. A miss queries the store once
    /// and writes the result back to the cache before returning.
    async fn fetch_products(&self) -> CatalogResult<FetchedProducts>;
}
