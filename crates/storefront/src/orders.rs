//! Order history queries and the admin dashboard summary.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sportswear_store_core::OrderStatus;

use crate::models::{Order, User};

/// Account allowed into the admin dashboard.
pub const ADMIN_EMAIL: &str = "admin@sportswearstore.com";

/// Days covered by the dashboard sales series, today included.
pub const SALES_WINDOW_DAYS: u64 = 30;

/// Sort key for the order history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderSort {
    #[default]
    Newest,
    Oldest,
    AmountHigh,
    AmountLow,
}

impl FromStr for OrderSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "amount-high" => Ok(Self::AmountHigh),
            "amount-low" => Ok(Self::AmountLow),
            other => Err(format!("unknown order sort: {other}")),
        }
    }
}

/// Order history search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Case-insensitive substring of the order id or any item name.
    pub text: String,
    /// `None` means every status.
    pub status: Option<OrderStatus>,
    pub sort: OrderSort,
}

impl OrderQuery {
    fn matches(&self, order: &Order, needle: &str) -> bool {
        if self.status.is_some_and(|status| order.status != status) {
            return false;
        }
        if needle.is_empty() {
            return true;
        }
        order
            .id
            .as_ref()
            .is_some_and(|id| id.as_str().to_lowercase().contains(needle))
            || order
                .items
                .iter()
                .any(|item| item.product_name.to_lowercase().contains(needle))
    }
}

/// Filter and sort an order history.
#[must_use]
pub fn query_orders<'a>(orders: &'a [Order], query: &OrderQuery) -> Vec<&'a Order> {
    let needle = query.text.trim().to_lowercase();
    let mut found: Vec<&Order> = orders
        .iter()
        .filter(|order| query.matches(order, &needle))
        .collect();

    match query.sort {
        OrderSort::Newest => found.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        OrderSort::Oldest => found.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        OrderSort::AmountHigh => found.sort_by(|a, b| b.total.cmp(&a.total)),
        OrderSort::AmountLow => found.sort_by(|a, b| a.total.cmp(&b.total)),
    }
    found
}

/// Number of orders in a given status.
#[must_use]
pub fn count_by_status(orders: &[Order], status: OrderStatus) -> usize {
    orders.iter().filter(|order| order.status == status).count()
}

// =============================================================================
// Admin Dashboard
// =============================================================================

/// Whether a user may open the admin dashboard.
#[must_use]
pub fn is_admin(user: &User) -> bool {
    user.email.as_str().eq_ignore_ascii_case(ADMIN_EMAIL)
}

/// Revenue and order count for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub orders: usize,
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub total_orders: usize,
    pub total_customers: usize,
    pub total_products: usize,
    pub average_order_value: Decimal,
    /// Oldest day first, ending with `today`.
    pub sales: Vec<DailySales>,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(orders: &[Order], customers: usize, products: usize, today: NaiveDate) -> Self {
        let total_revenue: Decimal = orders.iter().map(|order| order.total).sum();
        let average_order_value = if orders.is_empty() {
            Decimal::ZERO
        } else {
            (total_revenue / Decimal::from(orders.len())).round_dp(2)
        };

        Self {
            total_revenue,
            total_orders: orders.len(),
            total_customers: customers,
            total_products: products,
            average_order_value,
            sales: daily_sales(orders, today),
        }
    }
}

fn daily_sales(orders: &[Order], today: NaiveDate) -> Vec<DailySales> {
    (0..SALES_WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let day: Vec<&Order> = orders
                .iter()
                .filter(|order| order.created_at.date_naive() == date)
                .collect();
            DailySales {
                date,
                revenue: day.iter().map(|order| order.total).sum(),
                orders: day.len(),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sportswear_store_core::{AddressId, Email, OrderId, PaymentMethodKind};

    use super::*;
    use crate::models::{Address, OrderItem, PaymentMethod};

    fn address() -> Address {
        Address {
            id: AddressId::new("a1"),
            kind: sportswear_store_core::AddressKind::Home,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            company: None,
            street: "s".to_string(),
            city: "c".to_string(),
            postal_code: "p".to_string(),
            country: "FR".to_string(),
            phone: None,
            is_default: false,
        }
    }

    fn order(id: &str, item: &str, total: i64, status: OrderStatus, day: u32) -> Order {
        let created = Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap();
        Order {
            id: Some(OrderId::new(id)),
            user_id: "u1".into(),
            items: vec![OrderItem {
                product_id: "p1".into(),
                product_name: item.to_string(),
                product_image: String::new(),
                size: "M".to_string(),
                color: "Red".to_string(),
                quantity: 1,
                price: Decimal::from(total),
                total: Decimal::from(total),
            }],
            subtotal: Decimal::from(total),
            shipping: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::from(total),
            currency: sportswear_store_core::CurrencyCode::EUR,
            status,
            shipping_address: address(),
            billing_address: address(),
            payment_method: PaymentMethod {
                kind: PaymentMethodKind::Paypal,
                last4: None,
                brand: None,
                expiry_month: None,
                expiry_year: None,
            },
            tracking_number: None,
            estimated_delivery: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn history() -> Vec<Order> {
        vec![
            order("ORD-AAA", "PSG Home Jersey", 90, OrderStatus::Delivered, 1),
            order("ORD-BBB", "Real Madrid Away", 120, OrderStatus::Pending, 3),
            order("ORD-CCC", "PSG Away Jersey", 60, OrderStatus::Pending, 2),
        ]
    }

    fn ids(orders: &[&Order]) -> Vec<String> {
        orders
            .iter()
            .map(|o| o.id.as_ref().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_default_query_sorts_newest_first() {
        let orders = history();
        let found = query_orders(&orders, &OrderQuery::default());
        assert_eq!(ids(&found), ["ORD-BBB", "ORD-CCC", "ORD-AAA"]);
    }

    #[test]
    fn test_text_matches_id_or_item_name() {
        let orders = history();
        let by_item = OrderQuery {
            text: "psg".to_string(),
            sort: OrderSort::AmountHigh,
            ..OrderQuery::default()
        };
        assert_eq!(ids(&query_orders(&orders, &by_item)), ["ORD-AAA", "ORD-CCC"]);

        let by_id = OrderQuery {
            text: "bbb".to_string(),
            ..OrderQuery::default()
        };
        assert_eq!(ids(&query_orders(&orders, &by_id)), ["ORD-BBB"]);
    }

    #[test]
    fn test_status_filter() {
        let orders = history();
        let pending = OrderQuery {
            status: Some(OrderStatus::Pending),
            sort: OrderSort::AmountLow,
            ..OrderQuery::default()
        };
        assert_eq!(ids(&query_orders(&orders, &pending)), ["ORD-CCC", "ORD-BBB"]);
        assert_eq!(count_by_status(&orders, OrderStatus::Delivered), 1);
    }

    #[test]
    fn test_order_sort_from_str() {
        assert_eq!("amount-high".parse::<OrderSort>().unwrap(), OrderSort::AmountHigh);
        assert!("cheapest".parse::<OrderSort>().is_err());
    }

    #[test]
    fn test_dashboard_stats() {
        let orders = history();
        let today = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let stats = DashboardStats::compute(&orders, 7, 42, today);

        assert_eq!(stats.total_revenue, Decimal::from(270));
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_customers, 7);
        assert_eq!(stats.total_products, 42);
        assert_eq!(stats.average_order_value, Decimal::from(90));

        assert_eq!(stats.sales.len(), 30);
        let last = stats.sales.last().unwrap();
        assert_eq!(last.date, today);
        assert_eq!(last.revenue, Decimal::from(120));
        assert_eq!(stats.sales[28].orders, 1);
        assert_eq!(stats.sales[0].orders, 0);
    }

    #[test]
    fn test_empty_dashboard() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let stats = DashboardStats::compute(&[], 0, 0, today);
        assert_eq!(stats.average_order_value, Decimal::ZERO);
        assert!(stats.sales.iter().all(|day| day.orders == 0));
    }

    #[test]
    fn test_is_admin() {
        let admin = User::new("u0", Email::parse(ADMIN_EMAIL).unwrap(), "Admin");
        let fan = User::new("u1", Email::parse("fan@example.com").unwrap(), "Fan");
        assert!(is_admin(&admin));
        assert!(!is_admin(&fan));
    }
}
