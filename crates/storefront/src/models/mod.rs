//! Domain models for the storefront.
//!
//! These mirror the documents served by the catalog source and the hosted
//! backend. JSON field names follow the documents (camelCase); Rust field
//! names follow Rust conventions.

pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use order::{Order, OrderItem, PaymentMethod};
pub use product::{Category, Product, SubCategory};
pub use review::{AdminReply, Review};
pub use user::{Address, GeoLocation, User, UserPreferences};

/// Serde helpers for timestamps written by several producers.
///
/// Backend documents carry RFC 3339 timestamps, while hand-maintained
/// catalog files sometimes carry a bare `YYYY-MM-DD` date.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer};

    /// Deserialize an RFC 3339 timestamp or a bare date (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if the value is neither format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    /// Parse an RFC 3339 timestamp or a bare date.
    #[must_use]
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

}
