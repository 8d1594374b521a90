//! Storefront-only models.
//!
//! Marketplace records live in `souq_core`; this module holds what only the
//! web layer needs to keep between requests.

pub mod session;

pub use session::{CurrentUser, keys as session_keys};
