//! Postgres implementations of the repository traits.

mod product_repository;

pub use product_repository::PostgresProductRepository;
