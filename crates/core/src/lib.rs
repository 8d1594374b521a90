//! Souq Core - Shared marketplace library.
//!
//! This crate provides the types and pure logic used across all Souq components:
//! - `storefront` - Server-rendered marketplace for buyers, sellers, and admins
//! - `cli` - Command-line access to the catalog and backend client
//!
//! # Architecture
//!
//! The core crate contains only types, static data, and pure functions - no I/O,
//! no HTTP clients, no session handling. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`models`] - Product, store, order, user, and conversation records
//! - [`shopper`] - Per-session cart, wishlist, and preference state
//! - [`i18n`] - Language selection and translation tables
//! - [`listing`] - Search, sort, and pagination over in-memory lists
//! - [`dashboard`] - Seller and admin metrics and chart series
//! - [`mock`] - Static seed datasets and their query helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod i18n;
pub mod listing;
pub mod mock;
pub mod models;
pub mod shopper;
pub mod types;

pub use i18n::{Language, Translator};
pub use models::*;
pub use shopper::{Cart, CartItem, ShopperState, Wishlist, WishlistItem};
pub use types::*;
