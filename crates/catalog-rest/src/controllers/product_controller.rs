//! Product list controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use catalog_core::Product;
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api", get(list_products))
}

/// Returns the full product list, served from the cache when possible.
async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    debug!("List products request");

    let fetched = state.product_service.fetch_products().await?;
    ok(fetched.origin, fetched.products)
}
