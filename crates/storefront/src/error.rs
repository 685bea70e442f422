//! Unified error handling.
//!
//! Each concern has its own error enum; `StoreError` wraps them so binaries
//! and callers composing several workflows can use a single `Result<T>`.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::chat::ChatError;
use crate::config::ConfigError;
use crate::persistence::StorageError;
use crate::services::{AuthError, BackendError, CheckoutError, ProfileError};

/// Library-level error type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound("product p9".to_string());
        assert_eq!(err.to_string(), "Not found: product p9");

        let err = StoreError::BadRequest("quantity must be positive".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be positive");
    }

    #[test]
    fn test_from_conversions() {
        let err: StoreError = AuthError::WrongPassword.into();
        assert_eq!(err.to_string(), "Auth error: Incorrect password");

        let err: StoreError = CheckoutError::EmptyCart.into();
        assert!(matches!(err, StoreError::Checkout(_)));
    }
}
