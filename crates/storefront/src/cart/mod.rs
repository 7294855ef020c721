//! Shopping cart store.
//!
//! The cart is a list of [`LineItem`]s persisted as a JSON array under the
//! [`CART_STORAGE_KEY`] key of an injected [`KeyValueStorage`]. Each store is
//! constructed once per page (or CLI invocation) and owns its lines; every
//! mutation writes the whole list back and then emits one [`CartUpdated`]
//! through the injected [`CartNotifier`].
//!
//! # Identity
//!
//! Repeated adds merge on `(name, size, color)`, while `remove` and
//! `set_quantity` select lines by product id. The two keys can disagree:
//! two products with different ids but the same name, size and color share
//! one line that carries the first product's id. Both behaviors are kept
//! as they are.
//!
//! # Example
//!
//! ```rust
//! use boutique_core::{Price, ProductId};
//! use boutique_storefront::cart::{CartStore, ItemSnapshot, MemoryStorage, NoopNotifier};
//!
//! let mut cart = CartStore::load(MemoryStorage::new(), NoopNotifier, Default::default());
//! let bag = ItemSnapshot::new(ProductId::new("p1"), "Bag", Price::from_units(1000));
//! cart.add(bag.clone(), 2);
//! cart.add(bag, 1);
//! assert_eq!(cart.lines().len(), 1);
//! assert_eq!(cart.total_items(), 3);
//! ```

mod notify;
mod pricing;
mod storage;

use boutique_core::{LineItem, Price, Product, ProductId, UNKNOWN_ATTRIBUTE};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::instrument;

use crate::catalog::Catalog;

pub use notify::{BroadcastNotifier, CartNotifier, CartUpdated, NoopNotifier};
pub use pricing::{CartSummary, PricingPolicy};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Name used when an unknown product id is added.
pub const PLACEHOLDER_NAME: &str = "Product";

/// Image used when an unknown product id is added.
pub const PLACEHOLDER_IMAGE: &str = "/assets/product1.png";

/// Errors returned by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Checkout was requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,
}

/// Product data captured when an item is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl ItemSnapshot {
    /// Snapshot with no image, color or size.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: String::new(),
            color: None,
            size: None,
        }
    }

    /// Stand-in for an id that is not in the catalog.
    #[must_use]
    pub fn placeholder(id: ProductId) -> Self {
        Self {
            image_url: PLACEHOLDER_IMAGE.to_string(),
            ..Self::new(id, PLACEHOLDER_NAME, Price::ZERO)
        }
    }

    /// Set the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the size label.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    fn into_line(self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image_url: self.image_url,
            color: known_or_unknown(self.color),
            size: known_or_unknown(self.size),
            quantity,
        }
    }
}

impl From<&Product> for ItemSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            color: Some(product.color.clone()),
            size: Some(product.size.as_str().to_string()),
        }
    }
}

fn known_or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN_ATTRIBUTE.to_string())
}

/// What `add` did with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Quantity was added to an existing line with the same name, size and color.
    Merged,
    /// A new line was appended.
    Appended,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub lines: Vec<LineItem>,
    pub summary: CartSummary,
    pub placed_at: DateTime<Utc>,
}

/// Cart store with injected storage and notifier.
pub struct CartStore<S, N = NoopNotifier> {
    lines: Vec<LineItem>,
    storage: S,
    notifier: N,
    pricing: PricingPolicy,
}

impl<S, N> std::fmt::Debug for CartStore<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("pricing", &self.pricing)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStorage, N: CartNotifier> CartStore<S, N> {
    /// Load the cart from storage.
    ///
    /// A missing, unreadable or corrupt entry yields an empty cart. Stored
    /// lines with a zero quantity are dropped.
    pub fn load(storage: S, notifier: N, pricing: PricingPolicy) -> Self {
        let lines = read_lines(&storage);
        tracing::debug!(lines = lines.len(), "cart loaded");
        Self {
            lines,
            storage,
            notifier,
            pricing,
        }
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pricing rules in effect.
    #[must_use]
    pub const fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Add `quantity` of an item. A quantity of 0 counts as 1.
    ///
    /// Merges into the first line with the same name, size and color;
    /// otherwise appends a new line.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn add(&mut self, item: ItemSnapshot, quantity: u32) -> AddOutcome {
        let quantity = quantity.max(1);
        let candidate = item.into_line(quantity);

        let existing = self
            .lines
            .iter_mut()
            .find(|line| line.merge_key() == candidate.merge_key());

        let outcome = if let Some(line) = existing {
            line.quantity = line.quantity.saturating_add(quantity);
            tracing::debug!(quantity = line.quantity, "merged with existing line");
            AddOutcome::Merged
        } else {
            self.lines.push(candidate);
            AddOutcome::Appended
        };

        self.commit();
        outcome
    }

    /// Add an item by product id, resolving the snapshot from the catalog.
    ///
    /// Ids the catalog does not know (or when no catalog is loaded) are
    /// added as a placeholder item priced at zero.
    pub fn add_by_id(
        &mut self,
        id: &ProductId,
        quantity: u32,
        catalog: Option<&Catalog>,
    ) -> AddOutcome {
        let snapshot = catalog
            .and_then(|catalog| catalog.find(id))
            .map_or_else(
                || {
                    tracing::warn!(product_id = %id, "product not in catalog, using placeholder");
                    ItemSnapshot::placeholder(id.clone())
                },
                ItemSnapshot::from,
            );
        self.add(snapshot, quantity)
    }

    /// Remove every line with this product id. Returns how many were removed.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &ProductId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        let removed = before - self.lines.len();
        self.commit();
        removed
    }

    /// Overwrite the quantity of the first line with this id.
    ///
    /// A quantity of zero or less removes the id. Unknown ids are ignored and
    /// return `false`.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let Some(index) = self.lines.iter().position(|line| &line.id == id) else {
            return false;
        };
        if quantity <= 0 {
            self.remove(id);
            return true;
        }
        self.overwrite_at(index, quantity)
    }

    /// Overwrite the quantity of the line at `index`.
    ///
    /// A quantity of zero or less removes only that line. Out-of-range
    /// indexes are ignored and return `false`.
    pub fn set_quantity_at(&mut self, index: usize, quantity: i64) -> bool {
        if index >= self.lines.len() {
            return false;
        }
        if quantity <= 0 {
            self.lines.remove(index);
            self.commit();
            return true;
        }
        self.overwrite_at(index, quantity)
    }

    /// Add one to the first line with this id.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.quantity_of(id) {
            Some(current) => self.set_quantity(id, i64::from(current) + 1),
            None => false,
        }
    }

    /// Take one from the first line with this id, removing it at zero.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.quantity_of(id) {
            Some(current) => self.set_quantity(id, i64::from(current) - 1),
            None => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.commit();
    }

    /// Place the order: capture the lines and totals, then empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` if there is nothing to check out.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let receipt = CheckoutReceipt {
            summary: self.summary(),
            lines: std::mem::take(&mut self.lines),
            placed_at: Utc::now(),
        };
        self.commit();
        tracing::info!(
            total_items = receipt.summary.total_items,
            total = %receipt.summary.total,
            "checkout completed"
        );
        Ok(receipt)
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        PricingPolicy::subtotal(&self.lines)
    }

    /// Discount on the current subtotal.
    #[must_use]
    pub fn discount(&self) -> Price {
        self.pricing.discount(self.subtotal())
    }

    /// Shipping fee for the current cart.
    #[must_use]
    pub fn shipping(&self) -> Price {
        self.pricing.shipping(self.lines.len())
    }

    /// Subtotal minus discount plus shipping.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() - self.discount() + self.shipping()
    }

    /// All projections at once.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.pricing.summarize(&self.lines)
    }

    fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| &line.id == id)
            .map(|line| line.quantity)
    }

    fn overwrite_at(&mut self, index: usize, quantity: i64) -> bool {
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        line.quantity = quantity;
        self.commit();
        true
    }

    /// Persist, then notify.
    fn commit(&self) {
        write_lines(&self.storage, &self.lines);
        self.notifier.notify(&CartUpdated {
            lines: self.lines.clone(),
            total_items: self.total_items(),
        });
    }
}

fn read_lines(storage: &impl KeyValueStorage) -> Vec<LineItem> {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read cart, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<LineItem>>(&raw) {
        Ok(mut lines) => {
            lines.retain(|line| line.quantity > 0);
            lines
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored cart is corrupt, starting empty");
            Vec::new()
        }
    }
}

fn write_lines(storage: &impl KeyValueStorage, lines: &[LineItem]) {
    let json = match serde_json::to_string(lines) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize cart");
            return;
        }
    };
    if let Err(e) = storage.set(CART_STORAGE_KEY, &json) {
        tracing::warn!(error = %e, "failed to persist cart");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn bag() -> ItemSnapshot {
        ItemSnapshot::new(ProductId::new("p1"), "Bag", Price::from_units(1000))
            .with_color("red")
            .with_size("M")
    }

    fn store() -> CartStore<MemoryStorage> {
        CartStore::load(MemoryStorage::new(), NoopNotifier, PricingPolicy::default())
    }

    #[test]
    fn test_add_same_triple_merges_quantities() {
        let mut cart = store();
        assert_eq!(cart.add(bag(), 2), AddOutcome::Appended);
        assert_eq!(cart.add(bag(), 3), AddOutcome::Merged);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_add_different_id_same_triple_merges() {
        let mut cart = store();
        cart.add(bag(), 1);
        let mut twin = bag();
        twin.id = ProductId::new("p2");
        cart.add(twin, 1);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].id.as_str(), "p1");
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_add_same_id_different_color_keeps_separate_lines() {
        let mut cart = store();
        cart.add(bag(), 1);
        cart.add(bag().with_color("blue"), 1);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut cart = store();
        cart.add(bag(), 0);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_missing_color_and_size_use_sentinel() {
        let mut cart = store();
        cart.add(ItemSnapshot::new(ProductId::new("x"), "Hat", Price::ZERO), 1);
        assert_eq!(cart.lines()[0].color, UNKNOWN_ATTRIBUTE);
        assert_eq!(cart.lines()[0].size, UNKNOWN_ATTRIBUTE);
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        let mut cart = store();
        cart.add(bag(), 2);
        assert!(cart.set_quantity(&ProductId::new("p1"), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = store();
        cart.add(bag(), 2);
        assert!(!cart.set_quantity(&ProductId::new("nope"), 7));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_set_quantity_at_index() {
        let mut cart = store();
        cart.add(bag(), 1);
        cart.add(bag().with_color("blue"), 1);
        assert!(cart.set_quantity_at(1, 4));
        assert_eq!(cart.lines()[1].quantity, 4);
        assert!(cart.set_quantity_at(0, -1));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].color, "blue");
        assert!(!cart.set_quantity_at(5, 1));
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = store();
        let id = ProductId::new("p1");
        cart.add(bag(), 1);
        assert!(cart.increment(&id));
        assert_eq!(cart.total_items(), 2);
        assert!(cart.decrement(&id));
        assert!(cart.decrement(&id));
        assert!(cart.is_empty());
        assert!(!cart.decrement(&id));
    }

    #[test]
    fn test_remove_deletes_all_lines_with_id() {
        let mut cart = store();
        cart.add(bag(), 1);
        cart.add(bag().with_color("blue"), 1);
        assert_eq!(cart.remove(&ProductId::new("p1")), 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_mutations_persist_to_storage() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, NoopNotifier, PricingPolicy::default());
        cart.add(bag(), 2);

        let reloaded = CartStore::load(&storage, NoopNotifier, PricingPolicy::default());
        assert_eq!(reloaded.lines(), cart.lines());
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let storage = MemoryStorage::with_entry(CART_STORAGE_KEY, "{not json");
        let cart = CartStore::load(storage, NoopNotifier, PricingPolicy::default());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_lines_are_dropped_on_load() {
        let stored = r#"[
            {"id":"a","name":"A","price":1,"quantity":0},
            {"id":"b","name":"B","price":2,"quantity":3}
        ]"#;
        let storage = MemoryStorage::with_entry(CART_STORAGE_KEY, stored);
        let cart = CartStore::load(storage, NoopNotifier, PricingPolicy::default());
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_every_mutation_notifies_once() {
        let events = RefCell::new(Vec::new());
        let notifier = |e: &CartUpdated| events.borrow_mut().push(e.total_items);
        let mut cart = CartStore::load(MemoryStorage::new(), notifier, PricingPolicy::default());
        let id = ProductId::new("p1");

        cart.add(bag(), 2);
        cart.increment(&id);
        cart.remove(&id);
        cart.clear();

        assert_eq!(*events.borrow(), vec![2, 3, 0, 0]);
    }

    #[test]
    fn test_projections() {
        let mut cart = store();
        cart.add(bag(), 3);
        cart.add(
            ItemSnapshot::new(ProductId::new("p9"), "Belt", Price::from_units(500)),
            1,
        );
        assert_eq!(cart.subtotal(), Price::from_units(3500));
        assert_eq!(cart.discount(), Price::from_units(350));
        assert_eq!(cart.shipping(), Price::from_units(30));
        assert_eq!(cart.total(), Price::from_units(3180));
    }

    #[test]
    fn test_checkout_empties_cart() {
        let mut cart = store();
        assert_eq!(cart.checkout(), Err(CartError::EmptyCart));
        cart.add(bag(), 1);
        let receipt = cart.checkout().unwrap();
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.summary.total, Price::from_units(1030));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_by_id_without_catalog_uses_placeholder() {
        let mut cart = store();
        cart.add_by_id(&ProductId::new("ghost"), 2, None);
        let line = &cart.lines()[0];
        assert_eq!(line.name, PLACEHOLDER_NAME);
        assert_eq!(line.price, Price::ZERO);
        assert_eq!(line.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(line.quantity, 2);
    }
}
