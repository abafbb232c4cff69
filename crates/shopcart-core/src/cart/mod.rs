//! Shopping cart module.
//!
//! Contains the cart item type, the persisted cart store, change observers
//! and derived totals.

mod item;
mod observer;
mod store;
mod totals;

pub use item::CartItem;
pub use observer::{CartObserver, SubscriptionId};
pub use store::{CartStore, CART_STATE_VERSION, DEFAULT_CART_KEY};
pub use totals::{CartTotals, LineTotal};
