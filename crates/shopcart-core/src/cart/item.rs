//! Cart item type.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One distinct product selected for purchase.
///
/// `name`, `price` and `image_url` are a snapshot of the catalog record at
/// the time the product was first added; they are never re-synced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Display image reference.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Number of units selected. Always positive while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Create an item without an image.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: i64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: None,
            quantity,
        }
    }

    /// Set the display image.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Unit price as money.
    pub fn unit_price(&self, currency: Currency) -> Money {
        Money::new(self.price, currency)
    }

    /// Price times quantity.
    pub fn line_total(&self, currency: Currency) -> Money {
        self.unit_price(currency).times(self.quantity)
    }
}
