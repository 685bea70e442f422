//! Catalog document loading.
//!
//! The catalog is published as three static JSON documents
//! (`products.json`, `categories.json`, `reviews.json`) either behind a
//! base URL or in a local directory. HTTP responses are cached briefly so
//! repeated page loads do not refetch the whole catalog.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::models::{Category, Product, Review};

const PRODUCTS_DOCUMENT: &str = "products.json";
const CATEGORIES_DOCUMENT: &str = "categories.json";
const REVIEWS_DOCUMENT: &str = "reviews.json";

const CACHE_CAPACITY: u64 = 16;
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur while loading catalog documents.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog URL could not be built.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading a local catalog document failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for the expected shape.
    #[error("malformed {document}: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Where catalog documents come from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Documents served under a base URL (e.g. `https://shop.example/data/`).
    Http(Url),
    /// Documents read from a local directory.
    Directory(PathBuf),
}

impl CatalogSource {
    /// An HTTP source rooted at `base`.
    ///
    /// The base path gets a trailing slash so document names are joined
    /// beneath it: `http://host/data` serves `http://host/data/products.json`.
    #[must_use]
    pub fn http(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self::Http(base)
    }

    fn normalized(self) -> Self {
        match self {
            Self::Http(base) => Self::http(base),
            directory @ Self::Directory(_) => directory,
        }
    }
}

/// Loads catalog documents from a [`CatalogSource`].
///
/// Cheaply cloneable; clones share the HTTP client and document cache.
#[derive(Clone)]
pub struct CatalogLoader {
    inner: Arc<CatalogLoaderInner>,
}

struct CatalogLoaderInner {
    source: CatalogSource,
    client: reqwest::Client,
    cache: Cache<&'static str, Arc<String>>,
}

impl CatalogLoader {
    /// Create a loader for the given source.
    ///
    /// HTTP base URLs are normalized as by [`CatalogSource::http`].
    #[must_use]
    pub fn new(source: CatalogSource) -> Self {
        let source = source.normalized();
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogLoaderInner {
                source,
                client: reqwest::Client::new(),
                cache,
            }),
        }
    }

    /// The configured source.
    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.inner.source
    }

    /// Fetch the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or parsed.
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.document(PRODUCTS_DOCUMENT).await
    }

    /// Fetch the category tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or parsed.
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.document(CATEGORIES_DOCUMENT).await
    }

    /// Fetch all reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or parsed.
    pub async fn reviews(&self) -> Result<Vec<Review>, CatalogError> {
        self.document(REVIEWS_DOCUMENT).await
    }

    /// Drop cached HTTP documents so the next call refetches.
    pub fn invalidate(&self) {
        self.inner.cache.invalidate_all();
    }

    #[instrument(skip(self))]
    async fn document<T: DeserializeOwned>(
        &self,
        document: &'static str,
    ) -> Result<T, CatalogError> {
        let body = self.raw(document).await?;
        let parsed = serde_json::from_str(&body)
            .map_err(|source| CatalogError::Parse { document, source })?;
        Ok(parsed)
    }

    async fn raw(&self, document: &'static str) -> Result<Arc<String>, CatalogError> {
        match &self.inner.source {
            CatalogSource::Directory(dir) => {
                let path = dir.join(document);
                let body = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| CatalogError::Io { path, source })?;
                Ok(Arc::new(body))
            }
            CatalogSource::Http(base) => {
                if let Some(cached) = self.inner.cache.get(document).await {
                    tracing::debug!(document, "Catalog cache hit");
                    return Ok(cached);
                }

                let url = base.join(document)?;
                let body = self
                    .inner
                    .client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                let body = Arc::new(body);
                self.inner.cache.insert(document, Arc::clone(&body)).await;
                Ok(body)
            }
        }
    }
}
