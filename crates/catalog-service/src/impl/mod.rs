//! Service implementations.

mod product_service_impl;

pub use product_service_impl::{CacheSettings, ProductServiceImpl};
