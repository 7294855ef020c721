//! Product records as delivered by the catalog document.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Size, UNKNOWN_ATTRIBUTE};

/// A catalog product.
///
/// Products are read-only once loaded. Optional attributes missing from the
/// document fall back to the `"unknown"` sentinel (color, size, category) or
/// to zero (rating, popularity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "unknown_attribute")]
    pub category: String,
    #[serde(default = "unknown_attribute")]
    pub color: String,
    #[serde(default = "unknown_size")]
    pub size: Size,
    #[serde(default)]
    pub sales_status: bool,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub popularity: f64,
}

fn unknown_attribute() -> String {
    UNKNOWN_ATTRIBUTE.to_string()
}

fn unknown_size() -> Size {
    Size::Single(UNKNOWN_ATTRIBUTE.to_string())
}

impl Product {
    /// Whether the product is currently on sale.
    #[must_use]
    pub const fn on_sale(&self) -> bool {
        self.sales_status
    }
}
