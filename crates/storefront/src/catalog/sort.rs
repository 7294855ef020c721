//! Sort orders for the filtered product list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use boutique_core::Product;

/// Order applied to the filtered list. All orders are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Document order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    /// Most popular first.
    Popularity,
    /// Highest rated first.
    Rating,
}

impl SortKey {
    /// The select value this key is parsed from.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Popularity => "popularity",
            Self::Rating => "rating",
        }
    }

    /// Compare two products under this order.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Popularity => b.popularity.total_cmp(&a.popularity),
            Self::Rating => b.rating.total_cmp(&a.rating),
        }
    }

    /// Stable-sort `items` in place.
    pub fn apply<T>(self, items: &mut [(T, &Product)]) {
        if self == Self::Default {
            return;
        }
        items.sort_by(|(_, a), (_, b)| self.compare(a, b));
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unrecognized values keep document order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "popularity" => Self::Popularity,
            "rating" => Self::Rating,
            _ => Self::Default,
        })
    }
}
