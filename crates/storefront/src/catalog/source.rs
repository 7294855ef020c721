//! Product document sources.
//!
//! The catalog is fed by a single JSON document:
//!
//! ```json
//! { "products": [ ... ], "topBestSets": [ ... ] }
//! ```
//!
//! `data` is accepted in place of `products`. Sources fetch the document
//! over HTTP (same origin as the storefront), from disk, or from memory.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use boutique_core::Product;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::StorefrontConfig;

/// The product document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(alias = "data")]
    pub products: Vec<Product>,
    #[serde(rename = "topBestSets", default)]
    pub top_best_sets: Vec<Product>,
}

impl CatalogDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` if the text is not a valid document.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Errors that can occur while loading the product document.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or has the wrong shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A fetch URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The card template does not contain a product card.
    #[error("Card template is missing the product-card fragment")]
    InvalidTemplate,

    /// The source has no card template configured.
    #[error("No card template available")]
    NoTemplate,
}

/// Something that can produce the product document.
pub trait ProductSource {
    /// Load the full document.
    fn load(&self) -> impl Future<Output = Result<CatalogDocument, SourceError>> + Send;
}

/// Check that a fetched fragment holds the product card template.
fn check_template(text: String) -> Result<String, SourceError> {
    if text.contains("<template") && text.contains("product-card") {
        Ok(text)
    } else {
        Err(SourceError::InvalidTemplate)
    }
}

// =============================================================================
// StaticSource
// =============================================================================

/// In-memory document, mostly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    document: CatalogDocument,
}

impl StaticSource {
    #[must_use]
    pub const fn new(document: CatalogDocument) -> Self {
        Self { document }
    }

    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self::new(CatalogDocument {
            products,
            top_best_sets: Vec::new(),
        })
    }
}

impl ProductSource for StaticSource {
    async fn load(&self) -> Result<CatalogDocument, SourceError> {
        Ok(self.document.clone())
    }
}

// =============================================================================
// FileSource
// =============================================================================

/// Reads the document from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    template_path: Option<PathBuf>,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template_path: None,
        }
    }

    /// Also serve a card template from `path`.
    #[must_use]
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Read the product card template.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NoTemplate` if no template path is set, or an
    /// I/O or template error.
    pub async fn card_template(&self) -> Result<String, SourceError> {
        let path = self.template_path.as_ref().ok_or(SourceError::NoTemplate)?;
        check_template(tokio::fs::read_to_string(path).await?)
    }
}

impl ProductSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<CatalogDocument, SourceError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let document = CatalogDocument::from_json(&text)?;
        debug!(products = document.products.len(), "Loaded product document");
        Ok(document)
    }
}

// =============================================================================
// HttpSource
// =============================================================================

#[derive(Debug, Clone)]
enum CacheValue {
    Document(Box<CatalogDocument>),
    Template(String),
}

const DOCUMENT_KEY: &str = "document";
const TEMPLATE_KEY: &str = "template";

/// Fetches the document and card template over HTTP.
///
/// Responses are cached for 5 minutes.
#[derive(Clone)]
pub struct HttpSource {
    inner: Arc<HttpSourceInner>,
}

struct HttpSourceInner {
    client: reqwest::Client,
    products_url: Url,
    template_url: Url,
    cache: Cache<&'static str, CacheValue>,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("products_url", &self.inner.products_url.as_str())
            .field("template_url", &self.inner.template_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    /// Create a source for explicit URLs.
    #[must_use]
    pub fn new(products_url: Url, template_url: Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(HttpSourceInner {
                client: reqwest::Client::new(),
                products_url,
                template_url,
                cache,
            }),
        }
    }

    /// Create a source from storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Url` if either URL cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, SourceError> {
        Ok(Self::new(config.products_url()?, config.card_template_url()?))
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, SourceError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %text.chars().take(200).collect::<String>(),
                "Fetch returned non-success status"
            );
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(text)
    }

    /// Fetch the product card template fragment.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error, or `SourceError::InvalidTemplate` if the
    /// fragment has no product card template.
    #[instrument(skip(self))]
    pub async fn card_template(&self) -> Result<String, SourceError> {
        if let Some(CacheValue::Template(text)) = self.inner.cache.get(TEMPLATE_KEY).await {
            debug!("Cache hit for card template");
            return Ok(text);
        }

        let text = check_template(self.fetch_text(&self.inner.template_url).await?)?;
        self.inner
            .cache
            .insert(TEMPLATE_KEY, CacheValue::Template(text.clone()))
            .await;
        Ok(text)
    }

    /// Drop cached responses.
    pub fn invalidate(&self) {
        self.inner.cache.invalidate_all();
    }
}

impl ProductSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.inner.products_url))]
    async fn load(&self) -> Result<CatalogDocument, SourceError> {
        if let Some(CacheValue::Document(document)) = self.inner.cache.get(DOCUMENT_KEY).await {
            debug!("Cache hit for product document");
            return Ok(*document);
        }

        let text = self.fetch_text(&self.inner.products_url).await?;
        let document = match CatalogDocument::from_json(&text) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse product document"
                );
                return Err(e);
            }
        };

        self.inner
            .cache
            .insert(DOCUMENT_KEY, CacheValue::Document(Box::new(document.clone())))
            .await;
        debug!(products = document.products.len(), "Fetched product document");
        Ok(document)
    }
}
