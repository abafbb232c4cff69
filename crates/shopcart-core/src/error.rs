//! Commerce error types.

use thiserror::Error;

use crate::money::Currency;

/// Errors that can occur in storefront operations.
///
/// Cart mutations never fail; these cover catalog lookups and handing the
/// cart to the checkout provider.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Nothing to pay for.
    #[error("Cart is empty")]
    EmptyCart,

    /// Product has no unit price and cannot be added to the cart.
    #[error("Product has no price: {0}")]
    ProductNotPriced(String),

    /// Product is priced in a different currency than the cart.
    #[error("Product {product} is priced in {found}, cart is in {expected}")]
    CurrencyMismatch {
        product: String,
        expected: Currency,
        found: Currency,
    },

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog provider failure.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Checkout provider failure.
    #[error("Checkout provider error: {0}")]
    Provider(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] shopcart_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
