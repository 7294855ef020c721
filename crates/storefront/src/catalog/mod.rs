//! Product catalog: filtering, sorting, search and pagination.
//!
//! [`Catalog`] owns the full product list loaded from a [`CatalogDocument`]
//! and a current [`CatalogQuery`]. Every query change recomputes the
//! filtered set from the full list (filter and search, then a stable sort)
//! and puts the shopper back on page 1. Moving between pages never changes
//! the filtered set.
//!
//! The filtered set is held as indexes into the product list, so it is
//! always a subset of it and products are never copied or mutated.
//!
//! [`run`] is the same pipeline as a pure function over a product slice.

mod filter;
mod pagination;
mod sequence;
mod sort;
pub mod source;

use boutique_core::{Product, ProductId};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

pub use filter::{ProductFilter, name_matches};
pub use pagination::{Pagination, ResultRange};
pub use sequence::{RequestSequence, RequestTicket};
pub use sort::SortKey;
pub use source::{CatalogDocument, FileSource, HttpSource, ProductSource, SourceError, StaticSource};

use crate::config::DEFAULT_PAGE_SIZE;

/// Errors from the catalog pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The product list is empty, so there is nothing to show.
    #[error("no product data available")]
    NoData,

    /// A page outside `1..=total_pages` was requested.
    #[error("page {requested} is out of range (1-{total_pages})")]
    PageOutOfRange { requested: usize, total_pages: usize },
}

/// The shopper's current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub filter: ProductFilter,
    pub search: String,
    pub sort: SortKey,
}

/// A page-sized slice of the filtered set, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a> {
    pub items: Vec<&'a Product>,
    pub current_page: usize,
    pub total_pages: usize,
    pub range: ResultRange,
}

/// Indexes of the products matching `query`, in display order.
fn select(products: &[Product], query: &CatalogQuery) -> Vec<usize> {
    let mut matched: Vec<(usize, &Product)> = products
        .iter()
        .enumerate()
        .filter(|(_, product)| {
            query.filter.matches(product) && name_matches(product, &query.search)
        })
        .collect();
    query.sort.apply(&mut matched);
    matched.into_iter().map(|(index, _)| index).collect()
}

fn page_of<'a>(
    products: &'a [Product],
    filtered: &[usize],
    pagination: &Pagination,
) -> PageView<'a> {
    let items = filtered
        .iter()
        .skip(pagination.offset())
        .take(pagination.page_size())
        .filter_map(|&index| products.get(index))
        .collect();

    PageView {
        items,
        current_page: pagination.current(),
        total_pages: pagination.total_pages(filtered.len()),
        range: pagination.range(filtered.len()),
    }
}

/// Run the whole pipeline once: filter, search, sort, then cut out `page`.
///
/// # Errors
///
/// - `CatalogError::NoData` if `products` is empty
/// - `CatalogError::PageOutOfRange` if `page` is not a valid page
pub fn run<'a>(
    products: &'a [Product],
    query: &CatalogQuery,
    page: usize,
    page_size: usize,
) -> Result<PageView<'a>, CatalogError> {
    if products.is_empty() {
        return Err(CatalogError::NoData);
    }
    let filtered = select(products, query);
    let mut pagination = Pagination::new(page_size);
    if !pagination.go_to(page, filtered.len()) {
        return Err(CatalogError::PageOutOfRange {
            requested: page,
            total_pages: pagination.total_pages(filtered.len()),
        });
    }
    Ok(page_of(products, &filtered, &pagination))
}

/// Stateful catalog for one page view.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    top_best_sets: Vec<Product>,
    query: CatalogQuery,
    filtered: Vec<usize>,
    pagination: Pagination,
}

impl Catalog {
    /// Build a catalog over `products`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoData` if `products` is empty.
    pub fn new(products: Vec<Product>, page_size: usize) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::NoData);
        }
        let filtered = (0..products.len()).collect();
        Ok(Self {
            products,
            top_best_sets: Vec::new(),
            query: CatalogQuery::default(),
            filtered,
            pagination: Pagination::new(page_size),
        })
    }

    /// Build a catalog from a loaded document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoData` if the document has no products.
    pub fn from_document(document: CatalogDocument, page_size: usize) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(document.products, page_size)?;
        catalog.top_best_sets = document.top_best_sets;
        Ok(catalog)
    }

    /// Build a catalog with the default page size.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoData` if `products` is empty.
    pub fn with_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        Self::new(products, DEFAULT_PAGE_SIZE)
    }

    /// The full product list in document order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The "top best sets" showcase list.
    #[must_use]
    pub fn top_best_sets(&self) -> &[Product] {
        &self.top_best_sets
    }

    /// The current selection.
    #[must_use]
    pub const fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Look a product up by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// The filtered set in display order.
    pub fn filtered(&self) -> impl Iterator<Item = &Product> {
        self.filtered
            .iter()
            .filter_map(|&index| self.products.get(index))
    }

    /// Size of the filtered set.
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Replace the filter predicates.
    #[instrument(skip(self))]
    pub fn filter(&mut self, filter: ProductFilter) {
        self.query.filter = filter;
        self.refresh();
    }

    /// Replace the search term.
    #[instrument(skip(self))]
    pub fn search(&mut self, term: &str) {
        self.query.search = term.to_string();
        self.refresh();
    }

    /// Change the sort order.
    #[instrument(skip(self))]
    pub fn sort(&mut self, key: SortKey) {
        self.query.sort = key;
        self.refresh();
    }

    /// Drop the filter and search term. The sort order is kept.
    pub fn clear_filters(&mut self) {
        self.query.filter = ProductFilter::default();
        self.query.search.clear();
        self.refresh();
    }

    /// Current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.pagination.current()
    }

    /// Number of pages for the filtered set.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered.len())
    }

    /// Jump to `page`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PageOutOfRange` (and keeps the current page) if
    /// `page` is not between 1 and the page count.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), CatalogError> {
        if self.pagination.go_to(page, self.filtered.len()) {
            Ok(())
        } else {
            Err(CatalogError::PageOutOfRange {
                requested: page,
                total_pages: self.total_pages(),
            })
        }
    }

    /// Advance one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let next = self.current_page() + 1;
        self.pagination.go_to(next, self.filtered.len())
    }

    /// Go back one page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        let current = self.current_page();
        current > 1 && self.pagination.go_to(current - 1, self.filtered.len())
    }

    /// The current page.
    #[must_use]
    pub fn page(&self) -> PageView<'_> {
        page_of(&self.products, &self.filtered, &self.pagination)
    }

    fn refresh(&mut self) {
        self.filtered = select(&self.products, &self.query);
        self.pagination.reset();
        tracing::debug!(
            matched = self.filtered.len(),
            total = self.products.len(),
            "catalog refreshed"
        );
    }
}
