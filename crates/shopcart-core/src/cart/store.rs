//! The cart store.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shopcart_cache::{Cache, KeyValueStore};

use crate::cart::observer::Observers;
use crate::cart::{CartItem, CartObserver, CartTotals, SubscriptionId};
use crate::money::Currency;

/// Storage key used when none is given.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Version stamped on persisted carts. Any other version loads as empty.
pub const CART_STATE_VERSION: u32 = 0;

/// On-disk shape: `{"state":{"items":[...]},"version":0}`.
#[derive(Serialize, Deserialize)]
struct PersistedCart<T> {
    state: PersistedState<T>,
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct PersistedState<T> {
    items: T,
}

/// The shopper's current selection, kept in sync with durable storage.
///
/// Items are kept in insertion order with at most one entry per product id,
/// and every entry has a positive quantity. Each mutation writes the whole
/// collection back to storage and then notifies observers.
///
/// There is no global instance: create one at startup and pass it to
/// whatever needs it.
///
/// # Example
///
/// ```rust
/// use shopcart_cache::MemoryStore;
/// use shopcart_core::cart::{CartItem, CartStore};
///
/// let mut cart = CartStore::load(MemoryStore::new());
/// cart.add_item(CartItem::new("prod_1", "T-Shirt", 2500, 1));
/// cart.add_item(CartItem::new("prod_1", "T-Shirt", 2500, 2));
/// assert_eq!(cart.item_count(), 3);
///
/// cart.remove_item("prod_1");
/// assert_eq!(cart.item_count(), 2);
/// ```
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    items: Vec<CartItem>,
    observers: Observers,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Restore the cart saved under [`DEFAULT_CART_KEY`].
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, DEFAULT_CART_KEY)
    }

    /// Restore the cart saved under `key`.
    ///
    /// Missing, unreadable or malformed state yields an empty cart.
    pub fn load_with_key(store: S, key: impl Into<String>) -> Self {
        let cache = Cache::new(store);
        let key = key.into();
        let items = restore(&cache, &key);
        tracing::debug!(key = %key, items = items.len(), "cart loaded");

        Self {
            cache,
            key,
            items,
            observers: Observers::default(),
        }
    }

    /// Start with an empty cart under [`DEFAULT_CART_KEY`] without reading storage.
    pub fn empty(store: S) -> Self {
        Self::empty_with_key(store, DEFAULT_CART_KEY)
    }

    /// Start with an empty cart under `key` without reading storage.
    pub fn empty_with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
            items: Vec::new(),
            observers: Observers::default(),
        }
    }

    /// Add an item to the cart.
    ///
    /// If the product is already in the cart its quantity grows by
    /// `item.quantity` and the stored name, price and image are kept.
    /// Otherwise the item is appended. A zero quantity changes nothing.
    pub fn add_item(&mut self, item: CartItem) {
        if item.quantity == 0 {
            tracing::debug!(id = %item.id, "ignoring add with zero quantity");
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            tracing::debug!(id = %existing.id, quantity = existing.quantity, "cart item incremented");
        } else {
            tracing::debug!(id = %item.id, quantity = item.quantity, "cart item added");
            self.items.push(item);
        }

        self.commit();
    }

    /// Take one unit of a product out of the cart.
    ///
    /// The entry is dropped when its quantity reaches zero. Returns `false`
    /// (and leaves storage untouched) if the product isn't in the cart.
    pub fn remove_item(&mut self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        let Some(pos) = self.items.iter().position(|i| i.id.as_str() == id) else {
            tracing::debug!(id, "remove for unknown cart item");
            return false;
        };

        let remaining = self.items[pos].quantity.saturating_sub(1);
        if remaining == 0 {
            self.items.remove(pos);
            tracing::debug!(id, "cart item removed");
        } else {
            self.items[pos].quantity = remaining;
            tracing::debug!(id, quantity = remaining, "cart item decremented");
        }

        self.commit();
        true
    }

    /// Remove every item.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        tracing::debug!("cart cleared");
        self.commit();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up an item by product id.
    pub fn get(&self, id: impl AsRef<str>) -> Option<&CartItem> {
        let id = id.as_ref();
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Price the cart in `currency`.
    pub fn totals(&self, currency: Currency) -> CartTotals {
        CartTotals::from_items(&self.items, currency)
    }

    /// Register an observer for cart changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Storage key the cart is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The typed cache the cart writes through.
    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    fn commit(&self) {
        self.persist();
        self.observers.notify(&self.items);
    }

    /// Write the whole collection. Failures are logged and otherwise
    /// ignored: the in-memory cart stays authoritative for this session.
    fn persist(&self) {
        let snapshot = PersistedCart {
            state: PersistedState {
                items: self.items.as_slice(),
            },
            version: CART_STATE_VERSION,
        };

        if let Err(e) = self.cache.set(&self.key, &snapshot) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

fn restore<S: KeyValueStore>(cache: &Cache<S>, key: &str) -> Vec<CartItem> {
    let persisted = match cache.get::<PersistedCart<Vec<CartItem>>>(key) {
        Ok(Some(persisted)) => persisted,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable cart state");
            return Vec::new();
        }
    };

    if persisted.version != CART_STATE_VERSION {
        tracing::warn!(
            key,
            version = persisted.version,
            expected = CART_STATE_VERSION,
            "discarding cart state with unknown version"
        );
        return Vec::new();
    }

    let items = persisted.state.items;
    let valid = {
        let mut seen = HashSet::new();
        items
            .iter()
            .all(|item| item.quantity > 0 && seen.insert(item.id.as_str()))
    };
    if !valid {
        tracing::warn!(key, "discarding cart state with zero quantities or duplicate items");
        return Vec::new();
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_cache::MemoryStore;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem::new(id, format!("Product {id}"), price, quantity)
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartStore::load(MemoryStore::new());
        assert!(cart.is_empty());
        assert_eq!(cart.key(), DEFAULT_CART_KEY);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(item("b", 100, 1));
        cart.add_item(item("a", 200, 1));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(item("p1", 500, 2));
        cart.add_item(item("p1", 500, 1));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 3);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(item("p1", 500, 2).with_image("old.png"));
        cart.add_item(CartItem::new("p1", "Renamed", 999, 1).with_image("new.png"));

        let entry = cart.get("p1").unwrap();
        assert_eq!(entry.quantity, 3);
        assert_eq!(entry.price, 500);
        assert_eq!(entry.name, "Product p1");
        assert_eq!(entry.image_url.as_deref(), Some("old.png"));
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let store = MemoryStore::new();
        let mut cart = CartStore::load(store.clone());
        cart.add_item(item("p1", 500, 0));

        assert!(cart.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_saturates_quantity() {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(item("p1", 1, u32::MAX));
        cart.add_item(item("p1", 1, 5));
        assert_eq!(cart.get("p1").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(item("p1", 500, 2));

        assert!(cart.remove_item("p1"));
        assert_eq!(cart.get("p1").unwrap().quantity, 1);

        assert!(cart.remove_item("p1"));
        assert!(cart.get("p1").is_none());
        assert!(cart.is_empty());

        assert!(!cart.remove_item("p1"));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let store = MemoryStore::new();
        let mut cart = CartStore::load(store.clone());
        cart.add_item(item("p1", 500, 1));
        let before = store.get(DEFAULT_CART_KEY).unwrap();

        assert!(!cart.remove_item("nonexistent"));
        assert_eq!(cart.items(), &[item("p1", 500, 1)]);
        assert_eq!(store.get(DEFAULT_CART_KEY).unwrap(), before);
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(item("p1", 500, 1));
        cart.add_item(item("p2", 700, 4));

        cart.clear_cart();
        assert!(cart.is_empty());

        // Clearing an empty cart is fine too.
        cart.clear_cart();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_persisted_shape() {
        let store = MemoryStore::new();
        let mut cart = CartStore::load(store.clone());
        cart.add_item(item("p1", 500, 2));

        let bytes = store.get(DEFAULT_CART_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "state": {
                    "items": [{
                        "id": "p1",
                        "name": "Product p1",
                        "price": 500,
                        "imageUrl": null,
                        "quantity": 2
                    }]
                },
                "version": 0
            })
        );
    }

    #[test]
    fn test_custom_key() {
        let store = MemoryStore::new();
        let mut cart = CartStore::load_with_key(store.clone(), "cart-guest");
        cart.add_item(item("p1", 500, 1));

        assert!(store.exists("cart-guest").unwrap());
        assert!(!store.exists(DEFAULT_CART_KEY).unwrap());
        assert_eq!(CartStore::load_with_key(store, "cart-guest").len(), 1);
    }

    #[test]
    fn test_empty_ignores_saved_state() {
        let store = MemoryStore::new();
        CartStore::load(store.clone()).add_item(item("p1", 500, 1));

        let cart = CartStore::empty(store.clone());
        assert!(cart.is_empty());
        assert_eq!(CartStore::load(store).len(), 1);
    }

    #[test]
    fn test_totals() {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(item("p1", 500, 2));
        cart.add_item(item("p2", 1999, 1));

        let totals = cart.totals(Currency::USD);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal.amount_minor, 2999);
    }
}
