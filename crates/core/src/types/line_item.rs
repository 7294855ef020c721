//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// Sentinel used when a color or size is not known.
pub const UNKNOWN_ATTRIBUTE: &str = "unknown";

/// One entry in the cart.
///
/// The price is a snapshot taken when the item was first added. Quantity is
/// always at least 1 for a stored line; the cart removes lines instead of
/// keeping them at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "unknown")]
    pub color: String,
    #[serde(default = "unknown")]
    pub size: String,
    pub quantity: u32,
}

fn unknown() -> String {
    UNKNOWN_ATTRIBUTE.to_string()
}

/// The identity two line items must share to be merged.
///
/// Note that the product id is not part of it: two lines with different ids
/// but equal name, size and color merge into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeKey<'a> {
    pub name: &'a str,
    pub size: &'a str,
    pub color: &'a str,
}

impl LineItem {
    /// Build a line item from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            color: non_empty_or_unknown(&product.color),
            size: non_empty_or_unknown(product.size.as_str()),
            quantity,
        }
    }

    /// Key used to merge repeated adds.
    #[must_use]
    pub fn merge_key(&self) -> MergeKey<'_> {
        MergeKey {
            name: &self.name,
            size: &self.size,
            color: &self.color,
        }
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

fn non_empty_or_unknown(value: &str) -> String {
    if value.is_empty() {
        unknown()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_shape_is_camel_case() {
        let item = LineItem {
            id: ProductId::new("p1"),
            name: "Bag".to_string(),
            price: Price::from_units(100),
            image_url: "/a.png".to_string(),
            color: "red".to_string(),
            size: "M".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["imageUrl"], "/a.png");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_missing_color_and_size_default_to_unknown() {
        let json = r#"{ "id": "p1", "name": "Bag", "price": 5, "quantity": 1 }"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.color, UNKNOWN_ATTRIBUTE);
        assert_eq!(item.size, UNKNOWN_ATTRIBUTE);
    }

    #[test]
    fn test_merge_key_ignores_id() {
        let a = LineItem {
            id: ProductId::new("a"),
            name: "Bag".to_string(),
            price: Price::from_units(1),
            image_url: String::new(),
            color: "red".to_string(),
            size: "M".to_string(),
            quantity: 1,
        };
        let b = LineItem {
            id: ProductId::new("b"),
            ..a.clone()
        };
        assert_eq!(a.merge_key(), b.merge_key());
        assert_eq!(a.line_total(), Price::from_units(1));
    }
}
