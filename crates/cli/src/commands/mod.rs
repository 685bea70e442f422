//! CLI command implementations.
//!
//! Every command opens the same [`Context`]: configuration from the
//! environment, the persisted store restored from `STORE_STATE_DIR`, and a
//! catalog loader for the configured source.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod prefs;
pub mod reviews;
pub mod wishlist;

use std::sync::Arc;

use rust_decimal::Decimal;
use sportswear_store::catalog::CatalogLoader;
use sportswear_store::config::StoreConfig;
use sportswear_store::models::Product;
use sportswear_store::persistence::{FileStorage, Persister};
use sportswear_store::{Store, StoreError};
use sportswear_store_core::Price;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No product with id {0}")]
    UnknownProduct(String),

    #[error("No cart line matches {0}")]
    UnknownLine(String),

    #[error("{0} matches more than one cart line; use a longer prefix")]
    AmbiguousLine(String),

    #[error("Chat is disabled: set GEMINI_API_KEY to enable it")]
    ChatDisabled,
}

/// Shared state for a single CLI invocation.
pub struct Context {
    pub config: StoreConfig,
    pub store: Store,
    pub loader: CatalogLoader,
}

impl Context {
    /// Load configuration, restore the persisted store and fetch the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. Catalog fetch
    /// failures are logged and leave the catalog empty.
    pub async fn open() -> Result<Self, CommandError> {
        let config = StoreConfig::from_env().map_err(StoreError::from)?;
        tracing::debug!(state_dir = %config.state_dir.display(), "Opening store");

        let storage = Arc::new(FileStorage::new(config.state_dir.clone()));
        let mut store = Store::hydrate(Persister::new(storage, config.storage_key.clone()));

        let loader = CatalogLoader::new(config.catalog.clone());
        store.load_catalog(&loader).await;

        Ok(Self {
            config,
            store,
            loader,
        })
    }

    /// Look up a catalog product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownProduct`] when the id is not in the catalog.
    pub fn product(&self, id: &str) -> Result<&Product, CommandError> {
        self.store
            .product(id)
            .ok_or_else(|| CommandError::UnknownProduct(id.to_owned()))
    }

    /// Format an amount in the session currency.
    #[must_use]
    pub fn money(&self, amount: Decimal) -> String {
        Price::new(amount, self.store.session().currency()).display()
    }
}
