//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are kept as [`Decimal`] so that cart totals never accumulate binary
//! floating point error. On the wire they are plain JSON numbers, matching the
//! product document and previously persisted carts.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Sub};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount in the store currency.
///
/// ```
/// use boutique_core::Price;
///
/// let price: Price = "1000".parse().unwrap();
/// assert_eq!((price * 2).to_string(), "$2000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` when the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `percent`% of this amount, rounded to whole units (half away from zero).
    #[must_use]
    pub fn percent_rounded(&self, percent: Decimal) -> Self {
        let raw = self.0 * percent / Decimal::ONE_HUNDRED;
        Self(raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Subtract without going below zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid(s.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_trims_trailing_zeros() {
        let price: Price = "19.50".parse().unwrap();
        assert_eq!(price.to_string(), "$19.5");
        assert_eq!(Price::from_units(1000).to_string(), "$1000");
    }

    #[test]
    fn test_parse_accepts_dollar_prefix() {
        let price: Price = "$250".parse().unwrap();
        assert_eq!(price, Price::from_units(250));
    }

    #[test]
    fn test_parse_rejects_garbage_and_negative() {
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
        assert_eq!("-5".parse::<Price>(), Err(PriceError::Negative));
    }

    #[test]
    fn test_percent_rounded_half_away_from_zero() {
        assert_eq!(
            Price::from_units(3500).percent_rounded(Decimal::TEN),
            Price::from_units(350)
        );
        // 10% of 3005 is 300.5
        assert_eq!(
            Price::from_units(3005).percent_rounded(Decimal::TEN),
            Price::from_units(301)
        );
    }

    #[test]
    fn test_json_accepts_integers_and_floats() {
        let a: Price = serde_json::from_str("1000").unwrap();
        let b: Price = serde_json::from_str("1000.0").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_serializes_as_number() {
        let json = serde_json::to_value(Price::from_units(42)).unwrap();
        assert!(json.is_number());
    }

    #[test]
    fn test_arithmetic() {
        let total: Price = [Price::from_units(1000) * 2, Price::from_units(500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(2500));
        assert_eq!(
            Price::from_units(10).saturating_sub(Price::from_units(30)),
            Price::ZERO
        );
    }
}
