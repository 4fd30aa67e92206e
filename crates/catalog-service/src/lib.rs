//! # Catalog Service
//!
//! Cache-aside read path for the product list.
//! Contains the cache abstraction and its Redis implementation, the
//! [`ProductService`] fetcher, dependency health checks and cache metrics.

pub mod cache;
pub mod health;
pub mod metrics;
pub mod product_service;
pub mod r#impl;
pub mod timeout;

pub use cache::*;
pub use health::*;
pub use product_service::*;
pub use r#impl::{CacheSettings, ProductServiceImpl};
