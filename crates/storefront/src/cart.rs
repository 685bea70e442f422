//! Cart ledger.
//!
//! Line items are keyed by (product id, size, colour): adding a combination
//! that is already present increases its quantity instead of creating a
//! second line. The monetary total is derived from the lines on every read,
//! so it can never drift from them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sportswear_store_core::CartLineId;

use crate::models::Product;

/// Per-line cap the storefront applies when customers pick a quantity.
pub const MAX_LINE_QUANTITY: u32 = 10;

/// One purchase intent in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: CartLineId,
    /// Product snapshot taken when the line was created.
    pub product: Product,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    fn is_same_variant(&self, product: &Product, size: &str, color: &str) -> bool {
        self.product.id == product.id && self.size == size && self.color == color
    }
}

/// The cart's line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product variant.
    ///
    /// Merges into the existing line for the same (product, size, colour)
    /// or appends a new line. A zero quantity is ignored. Returns the id of
    /// the affected line.
    pub fn add_item(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Option<CartLineId> {
        if quantity == 0 {
            return None;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.is_same_variant(product, size, color))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return Some(line.id.clone());
        }

        let line = CartLineItem {
            id: CartLineId::generate(),
            product: product.clone(),
            size: size.to_owned(),
            color: color.to_owned(),
            quantity,
            added_at: Utc::now(),
        };
        let id = line.id.clone();
        self.lines.push(line);
        Some(id)
    }

    /// Remove a line. Unknown ids are ignored. Returns whether a line was removed.
    pub fn remove_item(&mut self, line_id: &CartLineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != line_id);
        self.lines.len() != before
    }

    /// Replace a line's quantity; zero removes the line. Unknown ids are
    /// ignored. Returns whether the cart changed.
    pub fn set_quantity(&mut self, line_id: &CartLineId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(line_id);
        }
        match self.lines.iter_mut().find(|line| &line.id == line_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Total number of units (header badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// How many more units of a variant can be added before its line hits
    /// [`MAX_LINE_QUANTITY`] or the product's stock.
    #[must_use]
    pub fn addable_quantity(
        &self,
        product: &Product,
        size: &str,
        color: &str,
        requested: u32,
    ) -> u32 {
        if requested == 0 {
            return 0;
        }
        let existing = self
            .lines
            .iter()
            .find(|line| line.is_same_variant(product, size, color))
            .map_or(0, |line| line.quantity);
        clamp_quantity(product, existing.saturating_add(requested)).saturating_sub(existing)
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, line_id: &CartLineId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| &line.id == line_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Clamp a requested quantity to what the storefront lets a customer pick
/// for one line: at least 1, at most [`MAX_LINE_QUANTITY`] and the stock.
///
/// Returns 0 when the product is out of stock.
#[must_use]
pub fn clamp_quantity(product: &Product, requested: u32) -> u32 {
    let ceiling = MAX_LINE_QUANTITY.min(product.stock);
    if ceiling == 0 {
        return 0;
    }
    requested.clamp(1, ceiling)
}
