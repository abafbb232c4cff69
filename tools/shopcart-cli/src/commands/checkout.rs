//! Checkout payload command.
//!
//! Builds the hosted checkout request for the current cart and prints it. The
//! cart itself is left untouched; it is cleared by the success page, not here.

use anyhow::{Context as _, Result};
use shopcart_core::checkout::CheckoutRequest;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart();
    let request = CheckoutRequest::from_items(cart.items(), &ctx.config.checkout)
        .context("Cannot start checkout")?;

    tracing::info!(
        lines = request.line_items.len(),
        items = cart.item_count(),
        "checkout payload built"
    );

    if args.form {
        for (key, value) in request.to_form_params() {
            println!("{}={}", key, value);
        }
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&request);
        return Ok(());
    }

    ctx.output.header("Checkout");
    ctx.output.kv("mode", request.mode.as_str());
    ctx.output.kv("success_url", &request.success_url);
    ctx.output.kv("cancel_url", &request.cancel_url);
    for line in &request.line_items {
        ctx.output.list_item(&format!(
            "{} x {} @ {} {}",
            line.quantity,
            line.description,
            line.unit_price,
            line.currency.code()
        ));
    }
    ctx.output.kv(
        "total",
        &cart.totals(ctx.config.checkout.currency).subtotal.display(),
    );
    Ok(())
}
