//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `BOUTIQUE_BASE_URL` - Origin the product document is fetched from (default: `http://127.0.0.1:8080`)
//! - `BOUTIQUE_PRODUCTS_PATH` - Path of the product document (default: `/assets/data.json`)
//! - `BOUTIQUE_CARD_TEMPLATE_PATH` - Path of the product card fragment (default: `/components/product-card.html`)
//! - `BOUTIQUE_STORAGE_DIR` - Directory for persisted state such as the cart (default: `.boutique`)
//! - `BOUTIQUE_PAGE_SIZE` - Products per catalog page (default: 12)
//! - `BOUTIQUE_SUBMIT_DELAY_MS` - Simulated form submission delay (default: 1000)
//! - `BOUTIQUE_DISCOUNT_THRESHOLD` - Subtotal above which the discount applies (default: 3000)
//! - `BOUTIQUE_DISCOUNT_PERCENT` - Discount percentage (default: 10)
//! - `BOUTIQUE_SHIPPING_FEE` - Flat shipping fee for a non-empty cart (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use boutique_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::cart::PricingPolicy;

/// Default number of products per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Origin for same-origin fetches (validated as an absolute URL)
    pub base_url: String,
    /// Path of the product document, relative to `base_url`
    pub products_path: String,
    /// Path of the product card template, relative to `base_url`
    pub card_template_path: String,
    /// Directory backing the key-value storage
    pub storage_dir: PathBuf,
    /// Products per catalog page
    pub page_size: usize,
    /// Delay used by the simulated submit transport
    pub submit_delay: Duration,
    /// Cart discount and shipping rules
    pub pricing: PricingPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            products_path: "/assets/data.json".to_string(),
            card_template_path: "/components/product-card.html".to_string(),
            storage_dir: PathBuf::from(".boutique"),
            page_size: DEFAULT_PAGE_SIZE,
            submit_delay: Duration::from_millis(1000),
            pricing: PricingPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("BOUTIQUE_BASE_URL").unwrap_or(defaults.base_url);
        Url::parse(&base_url).map_err(|e| invalid("BOUTIQUE_BASE_URL", &e.to_string()))?;
        let products_path = lookup("BOUTIQUE_PRODUCTS_PATH").unwrap_or(defaults.products_path);
        let card_template_path =
            lookup("BOUTIQUE_CARD_TEMPLATE_PATH").unwrap_or(defaults.card_template_path);
        let storage_dir = lookup("BOUTIQUE_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);

        let page_size = match lookup("BOUTIQUE_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => defaults.page_size,
        };

        let submit_delay = match lookup("BOUTIQUE_SUBMIT_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| invalid("BOUTIQUE_SUBMIT_DELAY_MS", &e.to_string()))?,
            None => defaults.submit_delay,
        };

        let mut pricing = defaults.pricing;
        if let Some(raw) = lookup("BOUTIQUE_DISCOUNT_THRESHOLD") {
            pricing.discount_threshold = parse_price("BOUTIQUE_DISCOUNT_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("BOUTIQUE_DISCOUNT_PERCENT") {
            pricing.discount_percent = raw
                .trim()
                .parse::<Decimal>()
                .map_err(|e| invalid("BOUTIQUE_DISCOUNT_PERCENT", &e.to_string()))?;
            if pricing.discount_percent < Decimal::ZERO
                || pricing.discount_percent > Decimal::ONE_HUNDRED
            {
                return Err(invalid(
                    "BOUTIQUE_DISCOUNT_PERCENT",
                    "must be between 0 and 100",
                ));
            }
        }
        if let Some(raw) = lookup("BOUTIQUE_SHIPPING_FEE") {
            pricing.shipping_fee = parse_price("BOUTIQUE_SHIPPING_FEE", &raw)?;
        }

        Ok(Self {
            base_url,
            products_path,
            card_template_path,
            storage_dir,
            page_size,
            submit_delay,
            pricing,
        })
    }

    /// Absolute URL of the product document.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the base URL or the joined path is invalid.
    pub fn products_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(&self.products_path)
    }

    /// Absolute URL of the product card template.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the base URL or the joined path is invalid.
    pub fn card_template_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(&self.card_template_path)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    let size = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid("BOUTIQUE_PAGE_SIZE", &e.to_string()))?;
    if size == 0 {
        return Err(invalid("BOUTIQUE_PAGE_SIZE", "must be at least 1"));
    }
    Ok(size)
}

fn parse_price(key: &str, raw: &str) -> Result<Price, ConfigError> {
    raw.parse::<Price>()
        .map_err(|e| invalid(key, &e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.submit_delay, Duration::from_millis(1000));
        assert_eq!(config.pricing, PricingPolicy::default());
        assert_eq!(
            config.products_url().unwrap().as_str(),
            "http://127.0.0.1:8080/assets/data.json"
        );
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("BOUTIQUE_BASE_URL", "https://shop.example"),
            ("BOUTIQUE_PAGE_SIZE", "24"),
            ("BOUTIQUE_SHIPPING_FEE", "15"),
            ("BOUTIQUE_DISCOUNT_PERCENT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.page_size, 24);
        assert_eq!(config.pricing.shipping_fee, Price::from_units(15));
        assert_eq!(config.pricing.discount_percent, Decimal::from(5));
        assert_eq!(
            config.card_template_url().unwrap().as_str(),
            "https://shop.example/components/product-card.html"
        );
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[("BOUTIQUE_PAGE_SIZE", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "BOUTIQUE_PAGE_SIZE"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("BOUTIQUE_BASE_URL", "not a url")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_discount_is_rejected() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("BOUTIQUE_DISCOUNT_PERCENT", "150")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_shipping_fee_is_rejected() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("BOUTIQUE_SHIPPING_FEE", "-1")]));
        assert!(result.is_err());
    }
}
