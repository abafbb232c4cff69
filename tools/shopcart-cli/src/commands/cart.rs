//! Cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use shopcart_cache::FileStore;
use shopcart_core::cart::{CartItem, CartStore};
use shopcart_core::catalog::CatalogProvider;
use shopcart_core::{CommerceError, ProductId};

use super::{AddArgs, ClearArgs, RemoveArgs};
use crate::context::Context;
use crate::output::cart_badge;

/// Open the cart with the badge observer attached.
fn open_cart(ctx: &Context) -> CartStore<FileStore> {
    let mut cart = ctx.open_cart();
    if !ctx.output.is_json() {
        cart.subscribe(|items: &[CartItem]| {
            let count = items.iter().map(|i| u64::from(i.quantity)).sum();
            println!("{}", cart_badge(count));
        });
    }
    cart
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    if args.quantity == 0 {
        ctx.output.warn("Quantity is zero, nothing to add");
        return Ok(());
    }

    let catalog = ctx.catalog()?;
    let id = ProductId::new(args.id);
    let product = catalog
        .get_product(&id)
        .await?
        .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
    let item = product.to_cart_item(args.quantity, ctx.config.checkout.currency)?;

    let mut cart = open_cart(ctx);
    cart.add_item(item);

    if ctx.output.is_json() {
        ctx.output.json(&cart.items());
        return Ok(());
    }

    let quantity = cart.get(&id).map(|i| i.quantity).unwrap_or(0);
    ctx.output.success(&format!(
        "Added {} x {} ({} in cart)",
        args.quantity, product.name, quantity
    ));
    Ok(())
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut cart = open_cart(ctx);

    if !cart.remove_item(&args.id) {
        ctx.output.warn(&format!("Not in cart: {}", args.id));
    } else {
        match cart.get(&args.id) {
            Some(item) => ctx
                .output
                .success(&format!("{} now at {}", item.name, item.quantity)),
            None => ctx.output.success(&format!("Removed {}", args.id)),
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&cart.items());
    }
    Ok(())
}

/// Run the clear command.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut cart = open_cart(ctx);

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", cart.item_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    cart.clear_cart();

    if ctx.output.is_json() {
        ctx.output.json(&cart.items());
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(())
}

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart();
    let totals = cart.totals(ctx.config.checkout.currency);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "totals": totals,
        }));
        return Ok(());
    }

    ctx.output.header(&cart_badge(totals.item_count));

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let name_width = cart.items().iter().map(|i| i.name.len()).max().unwrap_or(0).max(4);
    let widths = [name_width, 5, 10, 10];

    ctx.output.table_row(&["NAME", "QTY", "PRICE", "TOTAL"], &widths);
    for (item, line) in cart.items().iter().zip(&totals.lines) {
        ctx.output.table_row(
            &[
                &item.name,
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &line.total.display(),
            ],
            &widths,
        );
    }

    ctx.output.kv("Subtotal", &totals.subtotal.display());
    Ok(())
}
