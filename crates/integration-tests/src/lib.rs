//! Integration tests for the sportswear store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sportswear-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_scenarios` - cart, wishlist, notifications and search through [`Store`]
//! - `persistence` - snapshots written to and restored from a state directory
//! - `catalog_loading` - catalog documents read from the bundled `data/` directory
//! - `checkout_flow` - order placement, order history and the admin dashboard
//!
//! The helpers below build the small fixed catalog the scenarios share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use rust_decimal::Decimal;
use sportswear_store::Store;
use sportswear_store::models::{Address, PaymentMethod, Product, User};
use sportswear_store_core::{AddressId, AddressKind, Email, EmailError};

/// Directory holding the sample catalog shipped with the repository.
#[must_use]
pub fn sample_catalog_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// Football jersey priced at 50, sizes M/L, red and blue.
#[must_use]
pub fn p1() -> Product {
    Product {
        sport: "Football".to_owned(),
        league: "Ligue 1".to_owned(),
        club: "PSG".to_owned(),
        brand: "Nike".to_owned(),
        sizes: vec!["M".to_owned(), "L".to_owned()],
        colors: vec!["Red".to_owned(), "Blue".to_owned()],
        stock: 20,
        in_stock: true,
        rating: 4.5,
        ..Product::new("p1", "PSG Home Jersey", Decimal::from(50))
    }
}

/// Basketball jersey priced at 100, size L, gold.
#[must_use]
pub fn p2() -> Product {
    Product {
        sport: "Basketball".to_owned(),
        league: "NBA".to_owned(),
        club: "Lakers".to_owned(),
        brand: "Nike".to_owned(),
        sizes: vec!["L".to_owned()],
        colors: vec!["Gold".to_owned()],
        stock: 5,
        in_stock: true,
        rating: 4.9,
        featured: true,
        ..Product::new("p2", "Lakers Icon Jersey", Decimal::from(100))
    }
}

/// A store holding `[p1, p2]` and nothing else.
#[must_use]
pub fn store_with_catalog() -> Store {
    let mut store = Store::new();
    store.set_products(vec![p1(), p2()]);
    store
}

/// A signed-in customer.
///
/// # Errors
///
/// Returns an error if the fixture address fails to parse.
pub fn customer() -> Result<User, EmailError> {
    Ok(User::new("user-1", Email::parse("fan@example.com")?, "Fan"))
}

/// A default home address in Lyon.
#[must_use]
pub fn home_address() -> Address {
    Address {
        id: AddressId::new("addr-1"),
        kind: AddressKind::Home,
        first_name: "Camille".to_owned(),
        last_name: "Martin".to_owned(),
        company: None,
        street: "12 rue de la République".to_owned(),
        city: "Lyon".to_owned(),
        postal_code: "69002".to_owned(),
        country: "FR".to_owned(),
        phone: None,
        is_default: true,
    }
}

/// Visa card ending in 4242.
#[must_use]
pub fn visa() -> PaymentMethod {
    PaymentMethod::card("4242 4242 4242 4242", "Visa")
}
