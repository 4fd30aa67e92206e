//! # Catalog Repository
//!
//! Product store adapter backed by Postgres.
//!
//! ```text
//! ProductService
//!   ↓  Arc<dyn ProductRepository>   (store adapter interface)
//! PostgresProductRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! Postgres
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
