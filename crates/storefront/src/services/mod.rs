//! Workflows that talk to remote collaborators.
//!
//! # Services
//!
//! - `auth` - Provider error messages and sign-up password checks
//! - `backend` - Order and profile backend traits, plus an in-memory backend
//! - `checkout` - Shipping, promo codes, totals and order placement
//! - `profile` - Contact details, saved addresses and preferences

pub mod auth;
pub mod backend;
pub mod checkout;
pub mod profile;

pub use auth::AuthError;
pub use backend::{BackendError, InMemoryBackend, OrderBackend, ProfileBackend};
pub use checkout::{CheckoutError, CheckoutRequest, CheckoutTotals, PromoCode, ShippingOption};
pub use profile::{PreferenceUpdate, ProfileError, ProfileUpdate};
