//! # Catalog Server Library
//!
//! Wires configuration, the Postgres pool, the Redis cache and the REST
//! router into a running server, and owns the shutdown sequence.

pub mod app;
pub mod startup;
