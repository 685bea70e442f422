//! Hosted backend seams.
//!
//! The document database behind the storefront is remote and opaque; the
//! store reaches it only through these traits. [`InMemoryBackend`] keeps
//! documents in process for the CLI and for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use sportswear_store_core::{OrderId, ProductId, UserId};

use super::auth::AuthError;
use crate::models::{Order, User};

/// Errors returned by backend writes and reads.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The provider rejected the call for an authentication reason.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The signed-in user may not touch this document.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend could not be reached or failed internally.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Order documents and product stock.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Create an order document and return its assigned key.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the write is rejected or fails.
    async fn create_order(&self, order: &Order) -> Result<OrderId, BackendError>;

    /// Atomically decrement a product's stock counter.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the write is rejected or fails.
    async fn decrement_stock(&self, product_id: &ProductId, quantity: u32)
    -> Result<(), BackendError>;

    /// All orders placed by a user, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the read fails.
    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, BackendError>;
}

/// User profile documents.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    /// Overwrite the stored profile with `user`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the write is rejected or fails.
    async fn save_user(&self, user: &User) -> Result<(), BackendError>;
}

/// In-process backend holding orders, stock counters and profiles.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    orders: Mutex<Vec<Order>>,
    stock: Mutex<HashMap<ProductId, i64>>,
    users: Mutex<HashMap<UserId, User>>,
    unavailable: AtomicBool,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with [`BackendError::Unavailable`] (or succeed
    /// again with `false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Seed a product's stock counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    pub fn set_stock(&self, product_id: ProductId, stock: i64) -> Result<(), BackendError> {
        self.stock
            .lock()
            .map_err(|_| poisoned())?
            .insert(product_id, stock);
        Ok(())
    }

    /// Current stock counter, if one was seeded or decremented.
    #[must_use]
    pub fn stock(&self, product_id: &ProductId) -> Option<i64> {
        self.stock.lock().ok()?.get(product_id).copied()
    }

    /// Snapshot of stored orders.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// Stored profile for a user.
    #[must_use]
    pub fn user(&self, user_id: &UserId) -> Option<User> {
        self.users.lock().ok()?.get(user_id).cloned()
    }

    fn check_available(&self) -> Result<(), BackendError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("backend offline".to_string()));
        }
        Ok(())
    }
}

fn poisoned() -> BackendError {
    BackendError::Unavailable("lock poisoned".to_string())
}

#[async_trait]
impl OrderBackend for InMemoryBackend {
    async fn create_order(&self, order: &Order) -> Result<OrderId, BackendError> {
        self.check_available()?;
        let id = OrderId::generate();
        let mut stored = order.clone();
        stored.id = Some(id.clone());
        self.orders.lock().map_err(|_| poisoned())?.push(stored);
        Ok(id)
    }

    async fn decrement_stock(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), BackendError> {
        self.check_available()?;
        *self
            .stock
            .lock()
            .map_err(|_| poisoned())?
            .entry(product_id.clone())
            .or_insert(0) -= i64::from(quantity);
        Ok(())
    }

    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, BackendError> {
        self.check_available()?;
        Ok(self
            .orders
            .lock()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|order| &order.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProfileBackend for InMemoryBackend {
    async fn save_user(&self, user: &User) -> Result<(), BackendError> {
        self.check_available()?;
        self.users
            .lock()
            .map_err(|_| poisoned())?
            .insert(user.id.clone(), user.clone());
        Ok(())
    }
}
