//! Cart commands against the cart persisted in the storage directory.

use boutique_core::ProductId;
use boutique_storefront::cart::{CartStore, CartUpdated, FileStorage};
use boutique_storefront::catalog::Catalog;
use boutique_storefront::commands::{CartAction, DispatchOutcome, dispatch};
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::error::StorefrontError;
use boutique_storefront::views::CartView;

use super::Output;

type Notifier = fn(&CartUpdated);

/// The CLI's cart store.
pub type Cart = CartStore<FileStorage, Notifier>;

fn log_update(update: &CartUpdated) {
    tracing::info!(
        lines = update.lines.len(),
        total_items = update.total_items,
        "Cart updated"
    );
}

/// Open the cart stored under the configured storage directory.
pub fn open(config: &StorefrontConfig) -> Cart {
    CartStore::load(
        FileStorage::new(&config.storage_dir),
        log_update as Notifier,
        config.pricing,
    )
}

fn print_cart(view: &CartView) {
    if view.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in &view.items {
        println!(
            "{:>6}  {:<30} {:>6} {:>8} x{:<3} {:>10}",
            line.id, line.name, line.size, line.price, line.quantity, line.line_total
        );
    }
    let summary = &view.summary;
    println!();
    println!("Items:    {}", summary.item_count);
    println!("Subtotal: {}", summary.subtotal);
    println!("Discount: {}", summary.discount);
    println!("Shipping: {}", summary.shipping);
    println!("Total:    {}", summary.total);
}

/// Print the cart.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn show(cart: &Cart, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    let view = CartView::new(cart.lines(), &cart.summary());
    output.emit(&view, || print_cart(&view))?;
    Ok(())
}

fn run_action(
    cart: &mut Cart,
    catalog: Option<&Catalog>,
    action: CartAction,
) -> Result<DispatchOutcome, StorefrontError> {
    Ok(dispatch(cart, catalog, action)?)
}

/// Add a product by id.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn add(
    cart: &mut Cart,
    catalog: Option<&Catalog>,
    id: &str,
    quantity: Option<u32>,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    run_action(
        cart,
        catalog,
        CartAction::AddToCart {
            product_id: ProductId::new(id),
            quantity,
        },
    )?;
    show(cart, output)
}

/// Remove a product by id.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn remove(cart: &mut Cart, id: &str, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = run_action(
        cart,
        None,
        CartAction::RemoveFromCart {
            product_id: ProductId::new(id),
        },
    )?;
    if outcome == DispatchOutcome::Removed(0) {
        tracing::warn!(product_id = %id, "Product not in cart");
    }
    show(cart, output)
}

/// Overwrite the quantity of a product.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn set(
    cart: &mut Cart,
    id: &str,
    quantity: i64,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    if !cart.set_quantity(&ProductId::new(id), quantity) {
        tracing::warn!(product_id = %id, "Product not in cart");
    }
    show(cart, output)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if JSON output fails.
pub fn clear(cart: &mut Cart, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    run_action(cart, None, CartAction::Clear)?;
    show(cart, output)
}

/// Check out and print the receipt.
///
/// # Errors
///
/// Returns an error if the cart is empty.
pub fn checkout(cart: &mut Cart, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = run_action(cart, None, CartAction::Checkout).inspect_err(|e| {
        if !output.json {
            println!("{}", e.user_message());
        }
    })?;
    if let DispatchOutcome::CheckedOut(receipt) = outcome {
        let view = CartView::from(&receipt);
        output.emit(&view, || {
            println!("Thank you for your purchase!");
            println!("Your order has been processed successfully.");
            println!();
            print_cart(&view);
        })?;
    }
    Ok(())
}
