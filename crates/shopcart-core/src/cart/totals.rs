//! Cart totals.
//!
//! Totals are derived from the item collection on demand and never stored.

use crate::cart::CartItem;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;

/// Totals for a cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartTotals {
    /// Sum of all quantities.
    pub item_count: u64,
    /// Sum of price times quantity over all items.
    pub subtotal: Money,
    /// Per-item breakdown, in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    /// Compute totals for `items`, pricing them in `currency`.
    pub fn from_items(items: &[CartItem], currency: Currency) -> Self {
        let lines: Vec<LineTotal> = items
            .iter()
            .map(|item| LineTotal {
                id: item.id.clone(),
                unit_price: item.unit_price(currency),
                quantity: item.quantity,
                total: item.line_total(currency),
            })
            .collect();

        let item_count = items.iter().map(|i| u64::from(i.quantity)).sum();
        let subtotal = Money::new(
            lines
                .iter()
                .fold(0_i64, |acc, line| acc.saturating_add(line.total.amount_minor)),
            currency,
        );

        Self {
            item_count,
            subtotal,
            lines,
        }
    }

    /// Check if there is anything to pay for.
    pub fn is_payable(&self) -> bool {
        self.item_count > 0 && self.subtotal.amount_minor > 0
    }
}

/// Totals for a single cart item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineTotal {
    /// Product ID.
    pub id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// Unit price times quantity.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let items = vec![
            CartItem::new("p1", "Product A", 1000, 2),
            CartItem::new("p2", "Product B", 2000, 1),
        ];

        let totals = CartTotals::from_items(&items, Currency::USD);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal.amount_minor, 4000); // 2*1000 + 1*2000
        assert_eq!(totals.subtotal.display(), "$40.00");
        assert_eq!(totals.lines.len(), 2);
        assert_eq!(totals.lines[0].total.amount_minor, 2000);
        assert!(totals.is_payable());
    }

    #[test]
    fn test_empty_totals() {
        let totals = CartTotals::from_items(&[], Currency::USD);
        assert_eq!(totals.item_count, 0);
        assert!(totals.subtotal.is_zero());
        assert!(!totals.is_payable());
    }

    #[test]
    fn test_free_items_are_not_payable() {
        let items = vec![CartItem::new("p1", "Sticker", 0, 4)];
        let totals = CartTotals::from_items(&items, Currency::USD);
        assert_eq!(totals.item_count, 4);
        assert!(!totals.is_payable());
    }
}
