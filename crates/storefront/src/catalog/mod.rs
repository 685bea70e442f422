//! Catalog query engine and document loading.
//!
//! - [`filters`] - Sparse search predicates and sort selector
//! - [`query`] - Pure filter/sort/derive functions over a product list
//! - [`loader`] - Fetches catalog documents over HTTP or from disk

pub mod filters;
pub mod loader;
pub mod query;

pub use filters::{SearchFilters, SortOrder};
pub use loader::{CatalogError, CatalogLoader, CatalogSource};
pub use query::{FilterOptions, PriceRange, filter_options, search};
