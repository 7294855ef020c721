//! Typed cart commands.
//!
//! Page markup triggers cart actions through element attributes:
//!
//! | Markup | Action |
//! |--------|--------|
//! | `data-add-to-cart` + `data-product-id` [+ `data-quantity`] | [`CartAction::AddToCart`] |
//! | `data-remove-from-cart` + `data-product-id` | [`CartAction::RemoveFromCart`] |
//! | class `cart-item__qty-btn--plus` + `data-product-id` | [`CartAction::Increment`] |
//! | class `cart-item__qty-btn--minus` + `data-product-id` | [`CartAction::Decrement`] |
//! | `data-clear-cart` | [`CartAction::Clear`] |
//! | class `cart-checkout__btn` | [`CartAction::Checkout`] |
//!
//! [`CartAction::from_attributes`] turns an attribute map into an action and
//! [`dispatch`] runs it against a [`CartStore`].

use std::collections::HashMap;

use boutique_core::ProductId;
use tracing::instrument;

use crate::cart::{
    AddOutcome, CartError, CartNotifier, CartStore, CheckoutReceipt, KeyValueStorage,
};
use crate::catalog::Catalog;

/// One user action on the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// `quantity` of `None` adds one.
    AddToCart {
        product_id: ProductId,
        quantity: Option<u32>,
    },
    RemoveFromCart {
        product_id: ProductId,
    },
    Increment {
        product_id: ProductId,
    },
    Decrement {
        product_id: ProductId,
    },
    Clear,
    Checkout,
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Added(AddOutcome),
    /// Number of lines removed.
    Removed(usize),
    /// Whether a line with the id existed.
    QuantityChanged(bool),
    Cleared,
    CheckedOut(CheckoutReceipt),
}

impl CartAction {
    /// Map element attributes to an action.
    ///
    /// Returns `None` when the element carries no cart action, or when an
    /// action that needs a product id has none.
    #[must_use]
    pub fn from_attributes(attributes: &HashMap<&str, &str>) -> Option<Self> {
        let has_class = |class: &str| {
            attributes
                .get("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
        };

        if attributes.contains_key("data-add-to-cart") {
            let Some(product_id) = product_id(attributes) else {
                tracing::warn!("add-to-cart element has no product id");
                return None;
            };
            let quantity = attributes.get("data-quantity").and_then(|raw| leading_quantity(raw));
            return Some(Self::AddToCart {
                product_id,
                quantity,
            });
        }
        if attributes.contains_key("data-remove-from-cart") {
            return product_id(attributes).map(|product_id| Self::RemoveFromCart { product_id });
        }
        if has_class("cart-item__qty-btn--plus") {
            return product_id(attributes).map(|product_id| Self::Increment { product_id });
        }
        if has_class("cart-item__qty-btn--minus") {
            return product_id(attributes).map(|product_id| Self::Decrement { product_id });
        }
        if attributes.contains_key("data-clear-cart") {
            return Some(Self::Clear);
        }
        if has_class("cart-checkout__btn") {
            return Some(Self::Checkout);
        }
        None
    }
}

fn product_id(attributes: &HashMap<&str, &str>) -> Option<ProductId> {
    attributes
        .get("data-product-id")
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(ProductId::new)
}

/// Leading decimal digits of `raw` as a positive quantity.
///
/// `"3"` and `"3 items"` give 3; empty, zero, negative and non-numeric
/// values give `None`.
fn leading_quantity(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| trimmed.get(..end).unwrap_or_default());
    digits.parse::<u32>().ok().filter(|&quantity| quantity > 0)
}

/// Run one action against the cart.
///
/// # Errors
///
/// Returns `CartError::EmptyCart` when checking out an empty cart.
#[instrument(skip(cart, catalog))]
pub fn dispatch<S, N>(
    cart: &mut CartStore<S, N>,
    catalog: Option<&Catalog>,
    action: CartAction,
) -> Result<DispatchOutcome, CartError>
where
    S: KeyValueStorage,
    N: CartNotifier,
{
    let outcome = match action {
        CartAction::AddToCart {
            product_id,
            quantity,
        } => DispatchOutcome::Added(cart.add_by_id(&product_id, quantity.unwrap_or(1), catalog)),
        CartAction::RemoveFromCart { product_id } => DispatchOutcome::Removed(cart.remove(&product_id)),
        CartAction::Increment { product_id } => {
            DispatchOutcome::QuantityChanged(cart.increment(&product_id))
        }
        CartAction::Decrement { product_id } => {
            DispatchOutcome::QuantityChanged(cart.decrement(&product_id))
        }
        CartAction::Clear => {
            cart.clear();
            DispatchOutcome::Cleared
        }
        CartAction::Checkout => DispatchOutcome::CheckedOut(cart.checkout()?),
    };
    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::{Price, Product, Size};

    use super::*;
    use crate::cart::{MemoryStorage, NoopNotifier, PricingPolicy};

    fn attrs<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    fn catalog() -> Catalog {
        Catalog::with_products(vec![Product {
            id: ProductId::new("7"),
            name: "Silk Scarf".to_string(),
            price: Price::from_units(450),
            image_url: "/assets/product7.png".to_string(),
            category: "accessories".to_string(),
            color: "blue".to_string(),
            size: Size::parse("S-L"),
            sales_status: false,
            rating: 4.0,
            popularity: 10.0,
        }])
        .unwrap()
    }

    #[test]
    fn test_add_to_cart_attributes() {
        let action = CartAction::from_attributes(&attrs(&[
            ("data-add-to-cart", ""),
            ("data-product-id", "7"),
            ("data-quantity", "3"),
        ]));
        assert_eq!(
            action,
            Some(CartAction::AddToCart {
                product_id: ProductId::new("7"),
                quantity: Some(3)
            })
        );
    }

    #[test]
    fn test_bad_quantity_falls_back_to_default() {
        for raw in ["", "abc", "0", "-2"] {
            let action = CartAction::from_attributes(&attrs(&[
                ("data-add-to-cart", ""),
                ("data-product-id", "7"),
                ("data-quantity", raw),
            ]));
            assert!(
                matches!(action, Some(CartAction::AddToCart { quantity: None, .. })),
                "quantity {raw:?}"
            );
        }
        assert_eq!(leading_quantity("4 pcs"), Some(4));
    }

    #[test]
    fn test_missing_product_id_is_ignored() {
        assert_eq!(
            CartAction::from_attributes(&attrs(&[("data-add-to-cart", "")])),
            None
        );
        assert_eq!(
            CartAction::from_attributes(&attrs(&[("data-remove-from-cart", ""), ("data-product-id", " ")])),
            None
        );
    }

    #[test]
    fn test_quantity_buttons_by_class() {
        let plus = CartAction::from_attributes(&attrs(&[
            ("class", "cart-item__qty-btn cart-item__qty-btn--plus"),
            ("data-product-id", "7"),
        ]));
        assert!(matches!(plus, Some(CartAction::Increment { .. })));

        let minus = CartAction::from_attributes(&attrs(&[
            ("class", "cart-item__qty-btn cart-item__qty-btn--minus"),
            ("data-product-id", "7"),
        ]));
        assert!(matches!(minus, Some(CartAction::Decrement { .. })));

        assert_eq!(
            CartAction::from_attributes(&attrs(&[("class", "cart-checkout__btn")])),
            Some(CartAction::Checkout)
        );
        assert_eq!(CartAction::from_attributes(&attrs(&[("class", "button")])), None);
    }

    #[test]
    fn test_dispatch_sequence() {
        let catalog = catalog();
        let mut cart = CartStore::load(MemoryStorage::new(), NoopNotifier, PricingPolicy::default());
        let id = ProductId::new("7");

        let outcome = dispatch(
            &mut cart,
            Some(&catalog),
            CartAction::AddToCart {
                product_id: id.clone(),
                quantity: None,
            },
        )
        .unwrap();
        assert_eq!(outcome, DispatchOutcome::Added(AddOutcome::Appended));
        assert_eq!(cart.lines()[0].name, "Silk Scarf");

        dispatch(&mut cart, Some(&catalog), CartAction::Increment { product_id: id.clone() }).unwrap();
        assert_eq!(cart.total_items(), 2);

        dispatch(&mut cart, Some(&catalog), CartAction::Decrement { product_id: id.clone() }).unwrap();
        dispatch(&mut cart, Some(&catalog), CartAction::Decrement { product_id: id }).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_dispatch_checkout_of_empty_cart_fails() {
        let mut cart = CartStore::load(MemoryStorage::new(), NoopNotifier, PricingPolicy::default());
        assert_eq!(
            dispatch(&mut cart, None, CartAction::Checkout),
            Err(CartError::EmptyCart)
        );
    }

    #[test]
    fn test_dispatch_checkout_returns_receipt_and_clears() {
        let catalog = catalog();
        let mut cart = CartStore::load(MemoryStorage::new(), NoopNotifier, PricingPolicy::default());
        cart.add_by_id(&ProductId::new("7"), 2, Some(&catalog));

        let DispatchOutcome::CheckedOut(receipt) =
            dispatch(&mut cart, Some(&catalog), CartAction::Checkout).unwrap()
        else {
            panic!("expected a checkout receipt");
        };
        assert_eq!(receipt.summary.subtotal, Price::from_units(900));
        assert!(cart.is_empty());
    }
}
