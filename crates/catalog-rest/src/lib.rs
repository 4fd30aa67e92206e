//! # Catalog REST
//!
//! REST API layer using Axum for the catalog cache service.
//! Serves the product list at `/api` together with health, liveness and
//! readiness probes.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
