//! Catalog listing.

use anyhow::Result;
use shopcart_core::catalog::CatalogProvider;

use crate::context::Context;

/// Run the products command.
pub async fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let products = catalog.list_products().await?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Products");

    if products.is_empty() {
        ctx.output.info("The catalog has no products");
        return Ok(());
    }

    let id_width = products
        .iter()
        .map(|p| p.id.as_str().len())
        .max()
        .unwrap_or(0)
        .max(2);
    let name_width = products.iter().map(|p| p.name.len()).max().unwrap_or(0).max(4);
    let widths = [id_width, name_width, 10];

    ctx.output.table_row(&["ID", "NAME", "PRICE"], &widths);
    for product in &products {
        let price = product
            .unit_price()
            .map(|m| m.display())
            .unwrap_or_else(|| "-".to_string());
        ctx.output
            .table_row(&[product.id.as_str(), &product.name, &price], &widths);
    }

    ctx.output.debug(&format!("{} product(s)", products.len()));
    Ok(())
}
