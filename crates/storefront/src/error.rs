//! Unified error handling.
//!
//! Module errors fold into [`StorefrontError`]. Callers pick a fallback from
//! [`StorefrontError::category`] and show [`StorefrontError::user_message`],
//! which never exposes internal detail. No error is fatal; the worst case is
//! an empty or degraded view.

use thiserror::Error;

use crate::cart::{CartError, StorageError};
use crate::catalog::{CatalogError, SourceError};
use crate::config::ConfigError;
use crate::forms::FormError;

/// How an error is presented to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Products could not be loaded or there are none; show a fallback panel.
    DataUnavailable,
    /// User input was rejected; show it inline and let the user fix it.
    Validation,
    /// Persisted state could not be read or written; treat as empty.
    Storage,
    /// The request itself made no sense (bad page, empty checkout, bad config).
    Client,
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StorefrontError {
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Catalog(CatalogError::NoData) | Self::Source(_) => ErrorCategory::DataUnavailable,
            Self::Catalog(CatalogError::PageOutOfRange { .. }) | Self::Cart(_) | Self::Config(_) => {
                ErrorCategory::Client
            }
            Self::Storage(_) => ErrorCategory::Storage,
            Self::Form(_) => ErrorCategory::Validation,
        }
    }

    /// Message safe to show to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NoData) | Self::Source(_) => {
                "Products are unavailable right now. Please try again later.".to_string()
            }
            Self::Catalog(CatalogError::PageOutOfRange { .. }) => {
                "That page does not exist.".to_string()
            }
            Self::Cart(CartError::EmptyCart) => "Your cart is empty!".to_string(),
            Self::Storage(_) => "Your cart could not be saved.".to_string(),
            // Form messages are written for shoppers already
            Self::Form(err) => err.to_string(),
            Self::Config(_) => "The store is misconfigured.".to_string(),
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::TransportError;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::from(CatalogError::NoData);
        assert_eq!(err.to_string(), "Catalog error: no product data available");

        let err = StorefrontError::from(CartError::EmptyCart);
        assert_eq!(err.user_message(), "Your cart is empty!");
    }

    #[test]
    fn test_storefront_error_categories() {
        assert_eq!(
            StorefrontError::from(CatalogError::NoData).category(),
            ErrorCategory::DataUnavailable
        );
        assert_eq!(
            StorefrontError::from(SourceError::InvalidTemplate).category(),
            ErrorCategory::DataUnavailable
        );
        assert_eq!(
            StorefrontError::from(CatalogError::PageOutOfRange {
                requested: 4,
                total_pages: 3
            })
            .category(),
            ErrorCategory::Client
        );
        assert_eq!(
            StorefrontError::from(StorageError::Poisoned).category(),
            ErrorCategory::Storage
        );
        assert_eq!(
            StorefrontError::from(FormError::Invalid(Vec::new())).category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn test_user_message_hides_internal_detail() {
        let err = StorefrontError::from(SourceError::Status {
            status: 500,
            url: "http://internal:9000/assets/data.json".to_string(),
        });
        assert!(!err.user_message().contains("internal"));

        let err = StorefrontError::from(FormError::Transport(TransportError::Unavailable(
            "socket closed".to_string(),
        )));
        assert_eq!(
            err.user_message(),
            "Sorry, there was an error sending your message. Please try again."
        );
    }
}
