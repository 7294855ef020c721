//! Display data for product cards and the cart page.
//!
//! Views hold ready-to-render strings so templates and the CLI never
//! format money themselves.

use boutique_core::{LineItem, Price, Product};
use serde::Serialize;

use crate::cart::{CartSummary, CheckoutReceipt};
use crate::catalog::PageView;

/// Badge text for products on sale.
pub const SALE_BADGE: &str = "SALE";

fn format_price(price: Price) -> String {
    price.to_string()
}

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardView {
    pub id: String,
    pub image_url: String,
    pub image_alt: String,
    /// `Some("SALE")` for products on sale; the badge is hidden otherwise.
    pub badge: Option<&'static str>,
    pub name: String,
    pub price: String,
    /// Quantity carried by the card's add-to-cart control.
    pub add_quantity: u32,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            image_url: product.image_url.clone(),
            image_alt: product.name.clone(),
            badge: product.on_sale().then_some(SALE_BADGE),
            name: product.name.clone(),
            price: format_price(product.price),
            add_quantity: 1,
        }
    }
}

/// A rendered catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPageView {
    pub cards: Vec<ProductCardView>,
    pub current_page: usize,
    pub total_pages: usize,
    /// "Showing 1-12 of 25 Results"
    pub range: String,
}

impl From<&PageView<'_>> for CatalogPageView {
    fn from(page: &PageView<'_>) -> Self {
        Self {
            cards: page.items.iter().copied().map(ProductCardView::from).collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            range: page.range.to_string(),
        }
    }
}

/// One cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub size: String,
    pub color: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&LineItem> for CartLineView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            image_url: line.image_url.clone(),
            size: line.size.clone(),
            color: line.color.clone(),
            price: format_price(line.price),
            quantity: line.quantity,
            line_total: format_price(line.line_total()),
        }
    }
}

/// The order summary box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummaryView {
    pub item_count: u64,
    pub subtotal: String,
    pub discount: String,
    pub shipping: String,
    pub total: String,
}

impl From<&CartSummary> for CartSummaryView {
    fn from(summary: &CartSummary) -> Self {
        Self {
            item_count: summary.total_items,
            subtotal: format_price(summary.subtotal),
            discount: format_price(summary.discount),
            shipping: format_price(summary.shipping),
            total: format_price(summary.total),
        }
    }
}

/// The whole cart page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub summary: CartSummaryView,
}

impl CartView {
    /// Build from lines and their summary.
    #[must_use]
    pub fn new(lines: &[LineItem], summary: &CartSummary) -> Self {
        Self {
            items: lines.iter().map(CartLineView::from).collect(),
            summary: CartSummaryView::from(summary),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CheckoutReceipt> for CartView {
    fn from(receipt: &CheckoutReceipt) -> Self {
        Self::new(&receipt.lines, &receipt.summary)
    }
}
