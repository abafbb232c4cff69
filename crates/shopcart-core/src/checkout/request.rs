//! Checkout session payloads.

use crate::cart::{CartItem, CartTotals};
use crate::error::CommerceError;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Where the hosted checkout sends the shopper back to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Public base URL of the storefront (e.g. `https://shop.example.com`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Currency the cart prices are in.
    #[serde(default)]
    pub currency: Currency,
    /// Path shown after a successful payment.
    #[serde(default = "default_success_path")]
    pub success_path: String,
    /// Path shown when the shopper backs out of payment.
    #[serde(default = "default_cancel_path")]
    pub cancel_path: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_success_path() -> String {
    "/success".to_string()
}

fn default_cancel_path() -> String {
    "/checkout".to_string()
}

impl CheckoutConfig {
    /// Config with default paths and USD pricing.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            currency: Currency::default(),
            success_path: default_success_path(),
            cancel_path: default_cancel_path(),
        }
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the public base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Absolute success URL.
    pub fn success_url(&self) -> String {
        join_url(&self.base_url, &self.success_path)
    }

    /// Absolute cancel URL.
    pub fn cancel_url(&self) -> String {
        join_url(&self.base_url, &self.cancel_path)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Checkout session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// One-off payment.
    #[default]
    Payment,
}

impl CheckoutMode {
    /// Get the mode as the provider's wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// One line of the checkout payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutLineItem {
    /// Product name shown on the payment page.
    pub description: String,
    /// Unit price in minor units.
    pub unit_price: i64,
    /// Price currency.
    pub currency: Currency,
    /// Units purchased.
    pub quantity: u32,
}

impl CheckoutLineItem {
    /// Convert a cart item.
    pub fn from_cart_item(item: &CartItem, currency: Currency) -> Self {
        Self {
            description: item.name.clone(),
            unit_price: item.price,
            currency,
            quantity: item.quantity,
        }
    }
}

/// Everything the payment provider needs to open a hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRequest {
    /// Session mode.
    pub mode: CheckoutMode,
    /// Accepted payment methods.
    pub payment_method_types: Vec<String>,
    /// Line items, in cart order.
    pub line_items: Vec<CheckoutLineItem>,
    /// Redirect after payment.
    pub success_url: String,
    /// Redirect when payment is abandoned.
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Build the payload for `items`.
    ///
    /// Returns [`CommerceError::EmptyCart`] when there is nothing to pay for.
    pub fn from_items(items: &[CartItem], config: &CheckoutConfig) -> Result<Self, CommerceError> {
        if !CartTotals::from_items(items, config.currency).is_payable() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(Self {
            mode: CheckoutMode::Payment,
            payment_method_types: vec!["card".to_string()],
            line_items: items
                .iter()
                .map(|item| CheckoutLineItem::from_cart_item(item, config.currency))
                .collect(),
            success_url: config.success_url(),
            cancel_url: config.cancel_url(),
        })
    }

    /// Flatten into the provider's bracketed form encoding.
    ///
    /// ```text
    /// mode=payment
    /// payment_method_types[0]=card
    /// line_items[0][price_data][currency]=usd
    /// line_items[0][price_data][product_data][name]=T-Shirt
    /// line_items[0][price_data][unit_amount]=2500
    /// line_items[0][quantity]=2
    /// success_url=...
    /// cancel_url=...
    /// ```
    pub fn to_form_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("mode".to_string(), self.mode.as_str().to_string())];

        for (i, method) in self.payment_method_types.iter().enumerate() {
            params.push((format!("payment_method_types[{i}]"), method.clone()));
        }

        for (i, line) in self.line_items.iter().enumerate() {
            let prefix = format!("line_items[{i}]");
            params.push((
                format!("{prefix}[price_data][currency]"),
                line.currency.provider_code().to_string(),
            ));
            params.push((
                format!("{prefix}[price_data][product_data][name]"),
                line.description.clone(),
            ));
            params.push((
                format!("{prefix}[price_data][unit_amount]"),
                line.unit_price.to_string(),
            ));
            params.push((format!("{prefix}[quantity]"), line.quantity.to_string()));
        }

        params.push(("success_url".to_string(), self.success_url.clone()));
        params.push(("cancel_url".to_string(), self.cancel_url.clone()));
        params
    }
}
