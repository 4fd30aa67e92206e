//! Product entity.

use crate::Origin;
use serde::{Deserialize, Serialize};

/// A product row as stored in the relational store and in the cache.
///
/// The identifier serializes as `prodictId`. Existing clients and cached
/// payloads depend on that spelling, so it must not be corrected here.
///
/// Deserialization requires all three fields; a payload missing any of them
/// is rejected rather than producing a partial record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    #[serde(rename = "prodictId")]
    pub product_id: String,
    /// Display name.
    #[serde(rename = "productName")]
    pub product_name: String,
    /// Retail price.
    #[serde(rename = "retailPrice")]
    pub retail_price: f64,
}

impl Product {
    /// Creates a new product.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        retail_price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            retail_price,
        }
    }
}

/// A product list together with the tier it was served from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedProducts {
    pub products: Vec<Product>,
    pub origin: Origin,
}

impl FetchedProducts {
    #[must_use]
    pub fn from_cache(products: Vec<Product>) -> Self {
        Self {
            products,
            origin: Origin::Cache,
        }
    }

    #[must_use]
    pub fn from_database(products: Vec<Product>) -> Self {
        Self {
            products,
            origin: Origin::Database,
        }
    }
}
