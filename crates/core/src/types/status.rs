//! Status enums for stateful storefront widgets.

use serde::{Deserialize, Serialize};

/// Validation state of a single form field.
///
/// A field starts `Untouched`, moves to `Valid` or `Invalid` on its first
/// change or blur, toggles between those two on every later change, and
/// only returns to `Untouched` when the whole form is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl FieldStatus {
    /// Status after a validation pass with the given outcome.
    #[must_use]
    pub const fn from_outcome(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }

    /// Whether the field currently shows an error.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untouched => write!(f, "untouched"),
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}

impl std::str::FromStr for FieldStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "untouched" => Ok(Self::Untouched),
            "valid" => Ok(Self::Valid),
            "invalid" => Ok(Self::Invalid),
            _ => Err(format!("invalid field status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_status_default_is_untouched() {
        assert_eq!(FieldStatus::default(), FieldStatus::Untouched);
    }

    #[test]
    fn test_field_status_round_trips_through_display() {
        for status in [FieldStatus::Untouched, FieldStatus::Valid, FieldStatus::Invalid] {
            assert_eq!(status.to_string().parse::<FieldStatus>(), Ok(status));
        }
        assert!("dirty".parse::<FieldStatus>().is_err());
    }

    #[test]
    fn test_from_outcome() {
        assert_eq!(FieldStatus::from_outcome(true), FieldStatus::Valid);
        assert!(FieldStatus::from_outcome(false).is_invalid());
    }
}
