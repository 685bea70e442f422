//! Sportswear store client-state library.
//!
//! Catalog querying, cart, wishlist, notifications, session preferences and
//! a persistence adapter, gathered in an explicit [`Store`] container.
//! Remote collaborators (catalog host, document backend, chat completion,
//! durable storage) are reached through traits.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod orders;
pub mod persistence;
pub mod reviews;
pub mod services;
pub mod session;
pub mod state;
pub mod wishlist;

pub use error::{Result, StoreError};
pub use state::Store;
