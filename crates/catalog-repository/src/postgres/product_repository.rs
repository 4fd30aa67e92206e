//! Postgres product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Product};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// Fixed projection over the product relation.
///
/// The casts let integer identifiers and `NUMERIC` prices decode into the
/// `String` / `f64` fields of [`Product`].
const LIST_PRODUCTS_SQL: &str = r#"
    SELECT product_id::TEXT AS product_id,
           product_name,
           retail_price::FLOAT8 AS retail_price
    FROM products
"#;

/// Postgres product repository implementation.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PostgresProductRepository {
    /// Creates a new Postgres product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    product_id: String,
    product_name: String,
    retail_price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            product_id: row.product_id,
            product_name: row.product_name,
            retail_price: row.retail_price,
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        debug!("Listing all products");

        let rows = sqlx::query_as::<_, ProductRow>(LIST_PRODUCTS_SQL)
            .fetch_all(self.pool.inner())
            .await?;

        debug!("Fetched {} product rows", rows.len());
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
