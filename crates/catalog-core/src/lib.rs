//! # Catalog Core
//!
//! Core types and error definitions for the catalog cache service.
//! Every other crate in the workspace builds on the [`Product`] entity,
//! the [`Origin`] tag and the unified [`CatalogError`].

pub mod domain;
pub mod error;
pub mod result;

pub use domain::*;
pub use error::*;
pub use result::*;
