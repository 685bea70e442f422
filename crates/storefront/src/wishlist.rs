//! Wishlist: a set of saved product ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use sportswear_store_core::ProductId;

/// Saved product ids. Membership is what matters; order is not meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: HashSet<ProductId>,
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product. Returns `false` if it was already saved.
    pub fn add(&mut self, id: ProductId) -> bool {
        self.ids.insert(id)
    }

    /// Remove a product. Returns `false` if it was not saved.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        self.ids.remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.ids.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ProductId> for Wishlist {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
