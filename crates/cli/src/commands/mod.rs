//! Subcommand implementations.

pub mod cart;
pub mod catalog;
pub mod contact;

use serde::Serialize;
use url::Url;

use boutique_storefront::catalog::{
    Catalog, CatalogDocument, FileSource, HttpSource, ProductSource, SourceError,
};
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::error::StorefrontError;

/// Output mode shared by all commands.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print `value` as JSON in JSON mode, otherwise run `text`.
    pub fn emit<T: Serialize>(
        self,
        value: &T,
        text: impl FnOnce(),
    ) -> Result<(), serde_json::Error> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text();
        }
        Ok(())
    }
}

/// Load the product document from `source` (a URL or a file path), or from
/// the configured base URL when no source is given.
async fn load_document(
    config: &StorefrontConfig,
    source: Option<&str>,
) -> Result<CatalogDocument, SourceError> {
    match source {
        Some(raw) if raw.starts_with("http://") || raw.starts_with("https://") => {
            let products_url = Url::parse(raw)?;
            let template_url = products_url.join(&config.card_template_path)?;
            HttpSource::new(products_url, template_url).load().await
        }
        Some(path) => FileSource::new(path).load().await,
        None => HttpSource::from_config(config)?.load().await,
    }
}

/// Load a catalog, logging why it is unavailable on failure.
pub async fn load_catalog(
    config: &StorefrontConfig,
    source: Option<&str>,
) -> Result<Catalog, StorefrontError> {
    let document = load_document(config, source)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to load product document"))?;
    Ok(Catalog::from_document(document, config.page_size)?)
}
