//! Sportswear Store Core - Shared types library.
//!
//! This crate provides common types used across all sportswear store components:
//! - `storefront` - Client-side store state (catalog, cart, wishlist, notifications)
//! - `cli` - Command-line front-end over the store state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
