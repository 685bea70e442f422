//! Checkout: shipping, promo codes, totals and order placement.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use sportswear_store_core::{OrderId, OrderStatus};

use super::backend::{BackendError, OrderBackend};
use crate::cart::Cart;
use crate::models::order::short_reference;
use crate::models::{Address, Order, OrderItem, PaymentMethod};
use crate::notifications::NewNotification;
use crate::state::Store;

/// VAT applied to subtotal plus shipping minus discount, in percent.
const TAX_PERCENT: i64 = 20;

// =============================================================================
// Shipping & Promotions
// =============================================================================

/// Delivery speed offered at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShippingOption {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl ShippingOption {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::Overnight];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Overnight => "overnight",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard delivery",
            Self::Express => "Express delivery",
            Self::Overnight => "Next-day delivery",
        }
    }

    /// Delivery estimate shown next to the option.
    #[must_use]
    pub const fn estimate(self) -> &'static str {
        match self {
            Self::Standard => "5-7 business days",
            Self::Express => "2-3 business days",
            Self::Overnight => "24h",
        }
    }

    #[must_use]
    pub fn price(self) -> Decimal {
        match self {
            Self::Standard => Decimal::new(499, 2),
            Self::Express => Decimal::new(999, 2),
            Self::Overnight => Decimal::new(1999, 2),
        }
    }
}

impl fmt::Display for ShippingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ShippingOption {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CheckoutError::UnknownShippingOption(s.to_string()))
    }
}

/// Promotional code granting a percentage off the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromoCode {
    Welcome10,
    Sport15,
    Vip20,
}

impl PromoCode {
    pub const ALL: [Self; 3] = [Self::Welcome10, Self::Sport15, Self::Vip20];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Welcome10 => "WELCOME10",
            Self::Sport15 => "SPORT15",
            Self::Vip20 => "VIP20",
        }
    }

    #[must_use]
    pub const fn percent(self) -> u32 {
        match self {
            Self::Welcome10 => 10,
            Self::Sport15 => 15,
            Self::Vip20 => 20,
        }
    }

    /// Discount on `subtotal`, rounded to cents.
    #[must_use]
    pub fn discount(self, subtotal: Decimal) -> Decimal {
        round_cents(subtotal * Decimal::from(self.percent()) / Decimal::ONE_HUNDRED)
    }
}

impl FromStr for PromoCode {
    type Err = CheckoutError;

    /// Codes are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|promo| promo.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CheckoutError::InvalidPromoCode(s.to_string()))
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Money breakdown shown in the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CheckoutTotals {
    /// Compute totals: tax is charged on subtotal + shipping - discount, and
    /// total = subtotal + shipping + tax - discount.
    #[must_use]
    pub fn compute(subtotal: Decimal, shipping: ShippingOption, promo: Option<PromoCode>) -> Self {
        let shipping = shipping.price();
        let discount = promo.map_or(Decimal::ZERO, |p| p.discount(subtotal));
        let taxable = subtotal + shipping - discount;
        let tax = round_cents(taxable * Decimal::from(TAX_PERCENT) / Decimal::ONE_HUNDRED);
        Self {
            subtotal,
            shipping,
            discount,
            tax,
            total: subtotal + shipping + tax - discount,
        }
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Orders
// =============================================================================

/// Errors that stop an order before or during placement.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Sign in to place an order")]
    NotAuthenticated,
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),
    #[error("Unknown shipping option: {0}")]
    UnknownShippingOption(String),
    #[error("Order could not be placed: {0}")]
    Backend(#[from] BackendError),
}

/// Choices made on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub shipping_option: ShippingOption,
    pub promo: Option<PromoCode>,
    pub shipping_address: Address,
    /// Defaults to the shipping address.
    pub billing_address: Option<Address>,
    pub payment_method: PaymentMethod,
}

/// Snapshot a cart into order lines.
#[must_use]
pub fn order_items(cart: &Cart) -> Vec<OrderItem> {
    cart.lines()
        .iter()
        .map(|line| OrderItem {
            product_id: line.product.id.clone(),
            product_name: line.product.name.clone(),
            product_image: line.product.primary_image().unwrap_or_default().to_string(),
            size: line.size.clone(),
            color: line.color.clone(),
            quantity: line.quantity,
            price: line.product.price,
            total: line.line_total(),
        })
        .collect()
}

/// Build the pending order for the store's cart and signed-in user.
///
/// # Errors
///
/// Returns `CheckoutError::NotAuthenticated` without a user and
/// `CheckoutError::EmptyCart` when there is nothing to order.
pub fn build_order(store: &Store, request: &CheckoutRequest) -> Result<Order, CheckoutError> {
    let user = store.user().ok_or(CheckoutError::NotAuthenticated)?;
    if store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals =
        CheckoutTotals::compute(store.cart_total(), request.shipping_option, request.promo);
    let now = Utc::now();

    Ok(Order {
        id: None,
        user_id: user.id.clone(),
        items: order_items(store.cart()),
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        total: totals.total,
        currency: store.session().currency(),
        status: OrderStatus::Pending,
        shipping_address: request.shipping_address.clone(),
        billing_address: request
            .billing_address
            .clone()
            .unwrap_or_else(|| request.shipping_address.clone()),
        payment_method: request.payment_method.clone(),
        tracking_number: None,
        estimated_delivery: Some(request.shipping_option.estimate().to_string()),
        created_at: now,
        updated_at: now,
    })
}

/// Create the order document, then decrement stock for each line.
///
/// # Errors
///
/// Returns the first backend error. Stock already decremented is not
/// restored.
#[tracing::instrument(skip_all, fields(lines = order.items.len(), total = %order.total))]
pub async fn submit_order(
    backend: &dyn OrderBackend,
    mut order: Order,
) -> Result<Order, BackendError> {
    let id = backend.create_order(&order).await?;
    for item in &order.items {
        backend.decrement_stock(&item.product_id, item.quantity).await?;
    }
    tracing::info!(order_id = %id, "Order created");
    order.id = Some(id);
    Ok(order)
}

/// Apply the outcome of [`submit_order`] to the store.
///
/// Success clears the cart and posts an "Order confirmed" notification;
/// failure posts an error notification and leaves the cart untouched.
///
/// # Errors
///
/// Returns the backend error wrapped in [`CheckoutError`].
pub fn complete_order(
    store: &mut Store,
    result: Result<Order, BackendError>,
) -> Result<Order, CheckoutError> {
    match result {
        Ok(order) => {
            store.clear_cart();
            let id = order.id.as_ref().map_or("", OrderId::as_str);
            store.add_notification(
                NewNotification::success(
                    "Order confirmed",
                    format!("Your order #{} has been confirmed", short_reference(id)),
                )
                .with_action_url(format!("/orders/{id}")),
            );
            Ok(order)
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to place order");
            store.add_notification(NewNotification::error(
                "Order failed",
                "Something went wrong while placing your order",
            ));
            Err(err.into())
        }
    }
}

/// Place an order for the store's cart.
///
/// The store is only mutated after the backend calls finish.
///
/// # Errors
///
/// Returns a [`CheckoutError`] if the order cannot be built or the
/// backend rejects it.
pub async fn place_order(
    store: &mut Store,
    backend: &dyn OrderBackend,
    request: &CheckoutRequest,
) -> Result<Order, CheckoutError> {
    let order = build_order(store, request)?;
    let result = submit_order(backend, order).await;
    complete_order(store, result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sportswear_store_core::{AddressId, AddressKind, Email, NotificationKind, ProductId};

    use super::*;
    use crate::models::{Product, User};
    use crate::services::backend::InMemoryBackend;

    fn address() -> Address {
        Address {
            id: AddressId::new("a1"),
            kind: AddressKind::Home,
            first_name: "Kylian".to_string(),
            last_name: "Fan".to_string(),
            company: None,
            street: "1 Rue du Stade".to_string(),
            city: "Paris".to_string(),
            postal_code: "75016".to_string(),
            country: "FR".to_string(),
            phone: None,
            is_default: true,
        }
    }

    fn request(promo: Option<PromoCode>) -> CheckoutRequest {
        CheckoutRequest {
            shipping_option: ShippingOption::Standard,
            promo,
            shipping_address: address(),
            billing_address: None,
            payment_method: PaymentMethod::card("4242424242424242", "visa"),
        }
    }

    fn signed_in_store_with_cart() -> Store {
        let mut store = Store::new();
        store.set_user(Some(User::new(
            "u1",
            Email::parse("fan@example.com").unwrap(),
            "Fan",
        )));
        store.add_to_cart(&Product::new("p1", "Home Jersey", Decimal::from(50)), "M", "Red", 2);
        store
    }

    #[test]
    fn test_promo_codes_are_case_insensitive() {
        assert_eq!("welcome10".parse::<PromoCode>().unwrap(), PromoCode::Welcome10);
        assert_eq!(" Sport15 ".parse::<PromoCode>().unwrap(), PromoCode::Sport15);
        assert_eq!("VIP20".parse::<PromoCode>().unwrap().percent(), 20);
        assert!(matches!(
            "FREE100".parse::<PromoCode>(),
            Err(CheckoutError::InvalidPromoCode(_))
        ));
    }

    #[test]
    fn test_shipping_options() {
        assert_eq!(ShippingOption::default(), ShippingOption::Standard);
        assert_eq!("express".parse::<ShippingOption>().unwrap().price(), Decimal::new(999, 2));
        assert_eq!(ShippingOption::Overnight.price(), Decimal::new(1999, 2));
        assert!("drone".parse::<ShippingOption>().is_err());
    }

    #[test]
    fn test_totals_without_promo() {
        let totals = CheckoutTotals::compute(Decimal::from(100), ShippingOption::Standard, None);
        assert_eq!(totals.discount, Decimal::ZERO);
        // (100 + 4.99) * 0.2 = 20.998
        assert_eq!(totals.tax, Decimal::new(2100, 2));
        assert_eq!(totals.total, Decimal::new(12599, 2));
    }

    #[test]
    fn test_totals_with_promo() {
        let totals = CheckoutTotals::compute(
            Decimal::from(100),
            ShippingOption::Express,
            Some(PromoCode::Sport15),
        );
        assert_eq!(totals.discount, Decimal::from(15));
        // (100 + 9.99 - 15) * 0.2 = 18.998
        assert_eq!(totals.tax, Decimal::new(1900, 2));
        assert_eq!(totals.total, Decimal::new(11399, 2));
    }

    #[test]
    fn test_build_order_requires_user_and_cart() {
        let store = Store::new();
        assert!(matches!(
            build_order(&store, &request(None)),
            Err(CheckoutError::NotAuthenticated)
        ));

        let mut store = signed_in_store_with_cart();
        store.clear_cart();
        assert!(matches!(
            build_order(&store, &request(None)),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_build_order_snapshots_cart() {
        let store = signed_in_store_with_cart();
        let order = build_order(&store, &request(Some(PromoCode::Welcome10))).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].total, Decimal::from(100));
        assert_eq!(order.subtotal, Decimal::from(100));
        assert_eq!(order.billing_address, order.shipping_address);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method.last4.as_deref(), Some("4242"));
    }

    #[tokio::test]
    async fn test_place_order_success() {
        let backend = InMemoryBackend::new();
        backend.set_stock(ProductId::new("p1"), 20).unwrap();
        let mut store = signed_in_store_with_cart();

        let order = place_order(&mut store, &backend, &request(None)).await.unwrap();
        let id = order.id.clone().unwrap();

        assert!(store.cart().is_empty());
        assert_eq!(backend.stock(&ProductId::new("p1")), Some(18));
        assert_eq!(backend.orders().len(), 1);

        let note = &store.notifications()[0];
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.title, "Order confirmed");
        assert!(note.message.contains(short_reference(id.as_str())));
    }

    #[tokio::test]
    async fn test_place_order_failure_keeps_cart() {
        let backend = InMemoryBackend::new();
        backend.set_unavailable(true);
        let mut store = signed_in_store_with_cart();

        let err = place_order(&mut store, &backend, &request(None)).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Backend(_)));
        assert_eq!(store.cart().item_count(), 2);
        assert_eq!(store.notifications()[0].kind, NotificationKind::Error);
    }
}
