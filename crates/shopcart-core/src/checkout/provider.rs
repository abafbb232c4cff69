//! Hosted checkout provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::checkout::{CheckoutConfig, CheckoutRequest};
use crate::error::CommerceError;
use crate::ids::CheckoutSessionId;

/// A hosted checkout session opened by the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSession {
    /// Provider session ID.
    pub id: CheckoutSessionId,
    /// URL to redirect the shopper to.
    pub url: String,
}

/// Payment provider that can open hosted checkout sessions.
///
/// Session lifecycle after creation (payment, callbacks, webhooks) belongs
/// to the provider.
#[async_trait]
pub trait CheckoutProvider {
    /// Open a session for `request`.
    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CommerceError>;
}

/// Hand the cart contents to the provider and return the session to redirect to.
///
/// The cart itself is left untouched.
pub async fn begin_checkout<P>(
    items: &[CartItem],
    provider: &P,
    config: &CheckoutConfig,
) -> Result<CheckoutSession, CommerceError>
where
    P: CheckoutProvider + ?Sized,
{
    let request = CheckoutRequest::from_items(items, config)?;
    tracing::debug!(
        line_items = request.line_items.len(),
        "creating checkout session"
    );

    let session = provider.create_session(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "checkout session creation failed");
        e
    })?;

    tracing::info!(session_id = %session.id, "checkout session created");
    Ok(session)
}
