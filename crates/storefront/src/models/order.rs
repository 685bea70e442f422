//! Order documents written at checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sportswear_store_core::{
    CurrencyCode, OrderId, OrderStatus, PaymentMethodKind, ProductId, UserId,
};

use super::Address;

/// A placed order.
///
/// `id` is `None` until the backend has assigned a document key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub currency: CurrencyCode,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Short reference shown to customers (last 8 characters of the id).
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.id.as_ref().map(|id| short_reference(id.as_str()))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Last 8 characters of a document key.
#[must_use]
pub fn short_reference(id: &str) -> &str {
    let start = id
        .char_indices()
        .rev()
        .nth(7)
        .map_or(0, |(index, _)| index);
    id.get(start..).unwrap_or(id)
}

/// One line of a placed order, denormalized from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub product_image: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Payment instrument summary (never the full card number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_year: Option<u16>,
}

impl PaymentMethod {
    /// Card payment summary keeping only the last four digits.
    #[must_use]
    pub fn card(card_number: &str, brand: impl Into<String>) -> Self {
        let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
        let last4: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();
        Self {
            kind: PaymentMethodKind::Card,
            last4: (!last4.is_empty()).then_some(last4),
            brand: Some(brand.into()),
            expiry_month: None,
            expiry_year: None,
        }
    }
}
