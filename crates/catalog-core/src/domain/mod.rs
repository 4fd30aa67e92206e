//! Domain types shared by the store adapter, the fetcher and the HTTP layer.

mod origin;
mod product;

pub use origin::Origin;
pub use product::{FetchedProducts, Product};
