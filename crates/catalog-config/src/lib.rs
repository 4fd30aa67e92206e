//! # Catalog Config
//!
//! Configuration management for the catalog cache service.
//! Supports layered configuration from TOML files and environment variables,
//! validated before the server starts.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
