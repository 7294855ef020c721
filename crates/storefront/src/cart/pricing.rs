//! Derived money projections for the cart.

use boutique_core::{LineItem, Price};
use rust_decimal::Decimal;
use serde::Serialize;

/// Discount and shipping rules applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// The discount applies only when the subtotal is strictly above this.
    pub discount_threshold: Price,
    /// Discount as a percentage of the subtotal.
    pub discount_percent: Decimal,
    /// Flat fee charged on any non-empty cart.
    pub shipping_fee: Price,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            discount_threshold: Price::from_units(3000),
            discount_percent: Decimal::TEN,
            shipping_fee: Price::from_units(30),
        }
    }
}

/// Totals shown on the cart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_items: u64,
    pub subtotal: Price,
    pub discount: Price,
    pub shipping: Price,
    pub total: Price,
}

impl PricingPolicy {
    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn subtotal(lines: &[LineItem]) -> Price {
        lines.iter().map(LineItem::line_total).sum()
    }

    /// Discount for a given subtotal, rounded to whole units.
    #[must_use]
    pub fn discount(&self, subtotal: Price) -> Price {
        if subtotal > self.discount_threshold {
            subtotal.percent_rounded(self.discount_percent)
        } else {
            Price::ZERO
        }
    }

    /// Shipping for a cart with the given number of lines.
    #[must_use]
    pub const fn shipping(&self, line_count: usize) -> Price {
        if line_count == 0 {
            Price::ZERO
        } else {
            self.shipping_fee
        }
    }

    /// Compute every projection at once.
    #[must_use]
    pub fn summarize(&self, lines: &[LineItem]) -> CartSummary {
        let subtotal = Self::subtotal(lines);
        let discount = self.discount(subtotal);
        let shipping = self.shipping(lines.len());
        CartSummary {
            total_items: lines.iter().map(|line| u64::from(line.quantity)).sum(),
            subtotal,
            discount,
            shipping,
            total: subtotal - discount + shipping,
        }
    }
}
