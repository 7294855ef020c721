//! Product sizes, including the reserved multi-size tokens.
//!
//! Most products carry a single size label ("M", "XL", ...). Two labels are
//! reserved and stand for a product that covers several sizes at once:
//!
//! - [`Size::Range`] (`"S-L"`) covers S, M and L.
//! - [`Size::Set`] (`"S, M, XL"`) covers S, M and XL.
//!
//! Matching a selection against a product is not symmetric, see
//! [`Size::satisfies`].

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sizes covered by the range token.
const RANGE_MEMBERS: [&str; 3] = ["S", "M", "L"];

/// Sizes listed in the set token.
const SET_MEMBERS: [&str; 3] = ["S", "M", "XL"];

/// A product size label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Size {
    /// A plain size label such as `"M"`.
    Single(String),
    /// The reserved range token `"S-L"`.
    Range,
    /// The reserved set token `"S, M, XL"`.
    Set,
}

impl Size {
    /// Raw text of the range token.
    pub const RANGE_TOKEN: &'static str = "S-L";
    /// Raw text of the set token.
    pub const SET_TOKEN: &'static str = "S, M, XL";

    /// Parse a raw size label. Never fails; unreserved labels become [`Size::Single`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::RANGE_TOKEN => Self::Range,
            Self::SET_TOKEN => Self::Set,
            other => Self::Single(other.to_string()),
        }
    }

    /// The raw label as it appears in the product document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Single(label) => label,
            Self::Range => Self::RANGE_TOKEN,
            Self::Set => Self::SET_TOKEN,
        }
    }

    /// Whether a product labelled `self` should be shown when the shopper
    /// selected `selected`.
    ///
    /// - A single selection matches the same single label, the range token
    ///   when it is one of S/M/L, and the set token when it is one of S/M/XL.
    /// - Selecting a token matches only products labelled with that exact token.
    ///
    /// ```
    /// use boutique_core::Size;
    ///
    /// let m = Size::parse("M");
    /// assert!(Size::Range.satisfies(&m));
    /// assert!(!Size::Range.satisfies(&Size::parse("XL")));
    /// assert!(Size::Set.satisfies(&Size::parse("XL")));
    /// assert!(!m.satisfies(&Size::Range));
    /// ```
    #[must_use]
    pub fn satisfies(&self, selected: &Self) -> bool {
        match (selected, self) {
            (Self::Single(wanted), Self::Single(label)) => wanted == label,
            (Self::Single(wanted), Self::Range) => RANGE_MEMBERS.contains(&wanted.as_str()),
            (Self::Single(wanted), Self::Set) => SET_MEMBERS.contains(&wanted.as_str()),
            (Self::Range, Self::Range) | (Self::Set, Self::Set) => true,
            (Self::Range | Self::Set, _) => false,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(label: &str) -> Size {
        Size::Single(label.to_string())
    }

    #[test]
    fn test_parse_reserved_tokens() {
        assert_eq!(Size::parse("S-L"), Size::Range);
        assert_eq!(Size::parse("S, M, XL"), Size::Set);
        assert_eq!(Size::parse("M"), single("M"));
        // Tokens are matched verbatim
        assert_eq!(Size::parse("S,M,XL"), single("S,M,XL"));
    }

    #[test]
    fn test_single_selection_matches_exact_label() {
        assert!(single("M").satisfies(&single("M")));
        assert!(!single("XL").satisfies(&single("M")));
    }

    #[test]
    fn test_single_selection_against_range_product() {
        for wanted in ["S", "M", "L"] {
            assert!(Size::Range.satisfies(&single(wanted)), "{wanted} in S-L");
        }
        assert!(!Size::Range.satisfies(&single("XL")));
    }

    #[test]
    fn test_single_selection_against_set_product() {
        for wanted in ["S", "M", "XL"] {
            assert!(Size::Set.satisfies(&single(wanted)), "{wanted} in set");
        }
        assert!(!Size::Set.satisfies(&single("L")));
    }

    #[test]
    fn test_token_selection_matches_only_same_token() {
        assert!(Size::Range.satisfies(&Size::Range));
        assert!(!Size::Set.satisfies(&Size::Range));
        assert!(!single("M").satisfies(&Size::Range));

        assert!(Size::Set.satisfies(&Size::Set));
        assert!(!Size::Range.satisfies(&Size::Set));
        assert!(!single("XL").satisfies(&Size::Set));
    }

    #[test]
    fn test_serde_uses_raw_label() {
        let json = serde_json::to_string(&Size::Set).unwrap_or_default();
        assert_eq!(json, "\"S, M, XL\"");
        let parsed: Option<Size> = serde_json::from_str("\"S-L\"").ok();
        assert_eq!(parsed, Some(Size::Range));
    }
}
