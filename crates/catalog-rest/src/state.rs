//! Application state for Axum handlers.

use catalog_service::{HealthCheck, ProductService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(product_service: Arc<dyn ProductService>, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            product_service,
            health,
        }
    }
}
