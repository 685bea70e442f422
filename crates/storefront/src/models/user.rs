//! User profile snapshot types.
//!
//! The hosted backend is the system of record for these documents; the
//! client keeps a denormalized snapshot that is overwritten on next fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sportswear_store_core::{
    AddressId, AddressKind, CurrencyCode, Email, Language, ThemePreference, UserId,
};

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh profile, as written at first sign-in.
    #[must_use]
    pub fn new(id: impl Into<UserId>, email: Email, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email,
            display_name: display_name.into(),
            photo_url: None,
            phone_number: None,
            country: None,
            region: None,
            addresses: Vec::new(),
            preferences: UserPreferences::default(),
            created_at: now,
            last_login_at: now,
        }
    }

    /// The address flagged as default, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// Initials shown in the avatar when no photo is set.
    #[must_use]
    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect();
        if initials.is_empty() {
            self.email.initial().to_string()
        } else {
            initials
        }
    }
}

/// A saved postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    #[serde(rename = "type", default)]
    pub kind: AddressKind,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl Address {
    /// Recipient line as printed on a label.
    #[must_use]
    pub fn recipient(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Per-user storefront preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub language: Language,
    pub currency: CurrencyCode,
    pub newsletter: bool,
    pub notifications: bool,
    #[serde(default)]
    pub favorite_teams: Vec<String>,
    #[serde(default)]
    pub favorite_sports: Vec<String>,
    #[serde(default)]
    pub theme: ThemePreference,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            language: Language::default(),
            currency: CurrencyCode::default(),
            newsletter: false,
            notifications: true,
            favorite_teams: Vec::new(),
            favorite_sports: Vec::new(),
            theme: ThemePreference::default(),
        }
    }
}

/// Visitor location resolved at startup (never persisted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    pub country: String,
    pub region: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}
