//! Product records as returned by the catalog provider.

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize};

/// A product in the provider's catalog, with its default price expanded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Provider product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Description for listings.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URLs; the first one is used as the cart thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
    /// Default price, if the provider has one for this product.
    ///
    /// An unexpanded price reference (a bare price id) becomes a price with
    /// no amount.
    #[serde(default, deserialize_with = "price_or_reference")]
    pub default_price: Option<Price>,
}

/// A provider price record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    /// Provider price identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unit amount in minor units. Custom/"pay what you want" prices have none.
    #[serde(default)]
    pub unit_amount: Option<i64>,
    /// Price currency, `None` for currencies this storefront does not sell in.
    #[serde(default = "default_currency", deserialize_with = "known_currency")]
    pub currency: Option<Currency>,
}

impl Price {
    /// Fixed price in a supported currency.
    pub fn fixed(unit_amount: i64, currency: Currency) -> Self {
        Self {
            id: None,
            unit_amount: Some(unit_amount),
            currency: Some(currency),
        }
    }
}

fn default_currency() -> Option<Currency> {
    Some(Currency::default())
}

/// Unknown codes only unprice the one record instead of failing the catalog.
fn known_currency<'de, D>(deserializer: D) -> Result<Option<Currency>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code.as_deref().and_then(Currency::from_code))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceField {
    Expanded(Price),
    Reference(String),
}

fn price_or_reference<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<PriceField>::deserialize(deserializer)? {
        Some(PriceField::Expanded(price)) => Some(price),
        Some(PriceField::Reference(id)) => Some(Price {
            id: Some(id),
            unit_amount: None,
            currency: None,
        }),
        None => None,
    })
}

impl Product {
    /// Unit price, if the product has a fixed default price in a supported
    /// currency.
    pub fn unit_price(&self) -> Option<Money> {
        let price = self.default_price.as_ref()?;
        Some(Money::new(price.unit_amount?, price.currency?))
    }

    /// First image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Snapshot this product into a cart item for a cart priced in
    /// `currency`.
    ///
    /// Name, unit amount and first image are copied verbatim. Cart items carry
    /// bare amounts, so a product priced in another currency is refused.
    pub fn to_cart_item(&self, quantity: u32, currency: Currency) -> Result<CartItem, CommerceError> {
        let price = self
            .unit_price()
            .ok_or_else(|| CommerceError::ProductNotPriced(self.id.to_string()))?;

        if price.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                product: self.id.to_string(),
                expected: currency,
                found: price.currency,
            });
        }

        Ok(CartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: price.amount_minor,
            image_url: self.primary_image().map(str::to_string),
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_json() -> &'static str {
        r#"{
            "id": "prod_mug",
            "name": "Coffee Mug",
            "description": "Holds coffee.",
            "images": ["https://cdn.example.com/mug.png", "https://cdn.example.com/mug-2.png"],
            "default_price": { "unit_amount": 1250, "currency": "usd" }
        }"#
    }

    #[test]
    fn test_to_cart_item_copies_snapshot() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        let item = product.to_cart_item(1, Currency::USD).unwrap();

        assert_eq!(item.id.as_str(), "prod_mug");
        assert_eq!(item.name, "Coffee Mug");
        assert_eq!(item.price, 1250);
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example.com/mug.png"));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_unpriced_product_cannot_be_added() {
        let product = Product {
            id: ProductId::new("prod_custom"),
            name: "Donation".to_string(),
            description: None,
            images: vec![],
            default_price: Some(Price {
                id: None,
                unit_amount: None,
                currency: Some(Currency::USD),
            }),
        };

        assert!(product.unit_price().is_none());
        assert!(matches!(
            product.to_cart_item(1, Currency::USD),
            Err(CommerceError::ProductNotPriced(id)) if id == "prod_custom"
        ));
    }

    #[test]
    fn test_foreign_currency_is_refused() {
        let product = Product {
            id: ProductId::new("prod_scarf"),
            name: "Scarf".to_string(),
            description: None,
            images: vec![],
            default_price: Some(Price::fixed(2500, Currency::EUR)),
        };

        assert!(matches!(
            product.to_cart_item(1, Currency::USD),
            Err(CommerceError::CurrencyMismatch { product: id, expected: Currency::USD, found: Currency::EUR })
                if id == "prod_scarf"
        ));
        assert_eq!(product.to_cart_item(1, Currency::EUR).unwrap().price, 2500);
    }

    #[test]
    fn test_unsupported_currency_is_unpriced() {
        let product: Product = serde_json::from_str(
            r#"{"id":"prod_watch","name":"Watch","default_price":{"unit_amount":9900,"currency":"chf"}}"#,
        )
        .unwrap();

        assert_eq!(product.default_price.as_ref().unwrap().unit_amount, Some(9900));
        assert!(product.unit_price().is_none());
        assert!(matches!(
            product.to_cart_item(1, Currency::USD),
            Err(CommerceError::ProductNotPriced(_))
        ));
    }

    #[test]
    fn test_price_reference_is_unpriced() {
        let product: Product = serde_json::from_str(
            r#"{"id":"prod_x","name":"Lamp","default_price":"price_123"}"#,
        )
        .unwrap();

        let price = product.default_price.as_ref().unwrap();
        assert_eq!(price.id.as_deref(), Some("price_123"));
        assert!(product.unit_price().is_none());
    }

    #[test]
    fn test_missing_currency_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"id":"prod_x","name":"Pin","default_price":{"unit_amount":300}}"#,
        )
        .unwrap();
        assert_eq!(product.unit_price(), Some(Money::new(300, Currency::USD)));
    }

    #[test]
    fn test_minimal_record() {
        let product: Product =
            serde_json::from_str(r#"{"id":"prod_x","name":"Bare"}"#).unwrap();
        assert!(product.images.is_empty());
        assert!(product.default_price.is_none());
        assert!(product.primary_image().is_none());
    }
}
