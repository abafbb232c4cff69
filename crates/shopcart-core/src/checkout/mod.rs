//! Checkout module.
//!
//! Serializes the cart into the payload a hosted checkout provider expects
//! and defines the provider seam.

mod provider;
mod request;

pub use provider::{begin_checkout, CheckoutProvider, CheckoutSession};
pub use request::{CheckoutConfig, CheckoutLineItem, CheckoutMode, CheckoutRequest};
