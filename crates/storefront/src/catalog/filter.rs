//! Filter predicates and name search.

use boutique_core::{Product, Size};

/// Conjunctive product filter.
///
/// Inactive predicates (`None`, or `false` for `on_sale_only`) accept every
/// product. Color and category must match exactly; size follows
/// [`Size::satisfies`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub size: Option<Size>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub on_sale_only: bool,
}

impl ProductFilter {
    /// Build a filter from raw form values, where an empty string means
    /// "any".
    #[must_use]
    pub fn from_form_values(
        size: Option<&str>,
        color: Option<&str>,
        category: Option<&str>,
        on_sale_only: bool,
    ) -> Self {
        Self {
            size: non_empty(size).map(Size::parse),
            color: non_empty(color).map(str::to_string),
            category: non_empty(category).map(str::to_string),
            on_sale_only,
        }
    }

    /// Restrict to a size selection.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Restrict to a color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Restrict to a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Only show products on sale.
    #[must_use]
    pub const fn on_sale(mut self) -> Self {
        self.on_sale_only = true;
        self
    }

    /// Whether no predicate is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.is_none() && self.color.is_none() && self.category.is_none() && !self.on_sale_only
    }

    /// Whether `product` passes every active predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(size) = &self.size
            && !product.size.satisfies(size)
        {
            return false;
        }
        if let Some(color) = &self.color
            && &product.color != color
        {
            return false;
        }
        if let Some(category) = &self.category
            && &product.category != category
        {
            return false;
        }
        !self.on_sale_only || product.on_sale()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Case-insensitive substring match on the product name.
///
/// A blank term (empty or whitespace only) matches everything. A non-blank
/// term is used as typed, surrounding whitespace included.
#[must_use]
pub fn name_matches(product: &Product, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(&term.to_lowercase())
}
