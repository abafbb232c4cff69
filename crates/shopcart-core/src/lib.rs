//! Storefront cart domain for ShopCart.
//!
//! This crate holds the client-side state of a storefront that sells products
//! from an external catalog/payment provider:
//!
//! - **Cart**: the persisted [`CartStore`](cart::CartStore), change observers, totals
//! - **Catalog**: provider product records and how they become cart items
//! - **Checkout**: the line-item payload handed to a hosted checkout provider
//!
//! Storage is injected: the store works over any
//! [`KeyValueStore`](shopcart_cache::KeyValueStore).
//!
//! # Example
//!
//! ```rust
//! use shopcart_cache::MemoryStore;
//! use shopcart_core::prelude::*;
//!
//! let storage = MemoryStore::new();
//!
//! let mut cart = CartStore::load(storage.clone());
//! cart.add_item(CartItem::new("prod_tee", "T-Shirt", 2500, 2));
//! cart.add_item(CartItem::new("prod_mug", "Mug", 1250, 1));
//!
//! let totals = cart.totals(Currency::USD);
//! assert_eq!(totals.subtotal.display(), "$62.50");
//!
//! // A later session picks up where this one left off.
//! let restored = CartStore::load(storage);
//! assert_eq!(restored.items(), cart.items());
//!
//! let config = CheckoutConfig::new("https://shop.example.com");
//! let request = CheckoutRequest::from_items(cart.items(), &config).unwrap();
//! assert_eq!(request.line_items.len(), 2);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        CartItem, CartObserver, CartStore, CartTotals, LineTotal, SubscriptionId,
        DEFAULT_CART_KEY,
    };

    // Catalog
    pub use crate::catalog::{CatalogProvider, Price, Product, StaticCatalog};

    // Checkout
    pub use crate::checkout::{
        begin_checkout, CheckoutConfig, CheckoutLineItem, CheckoutMode, CheckoutProvider,
        CheckoutRequest, CheckoutSession,
    };
}
