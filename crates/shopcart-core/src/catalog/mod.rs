//! Product catalog module.
//!
//! Product records are owned by the external catalog provider; this module
//! only describes their shape and how a record becomes a cart item.

mod product;
mod provider;

pub use product::{Price, Product};
pub use provider::{CatalogProvider, StaticCatalog};
