//! Data-access helpers over the backend client.
//!
//! # Services
//!
//! - `catalog` - Products, stores, reviews, product creation and images
//! - `orders` - Buyer and store order history
//! - `messages` - Sending buyer/seller messages
//!
//! Every helper makes exactly one backend call (or a fixed sequence), decodes
//! the rows into `souq_core` records, and never returns an error: failures are
//! logged at `error!` and collapse to `[]`, `None`, `0`, or the submitted value.
//! Callers decide whether to fall back to seed data.

pub mod catalog;
pub mod messages;
pub mod orders;

use serde::de::DeserializeOwned;

use crate::backend::{BackendResult, Row, decode_row, decode_rows};

/// Table names in the hosted backend.
pub mod tables {
    pub const PRODUCTS: &str = "products";
    pub const STORES: &str = "stores";
    pub const ORDERS: &str = "orders";
    pub const REVIEWS: &str = "reviews";
    pub const MESSAGES: &str = "messages";
}

/// Storage bucket for product photos.
pub const PRODUCT_IMAGES_BUCKET: &str = "product-images";

/// Decode a list result, logging and defaulting on any failure.
fn rows_or_empty<T: DeserializeOwned>(operation: &str, result: BackendResult<Vec<Row>>) -> Vec<T> {
    match result.map(decode_rows::<T>) {
        Ok(Ok(items)) => items,
        Ok(Err(e)) => {
            tracing::error!(operation, error = %e, "Failed to decode rows");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(operation, error = %e, "Backend query failed");
            Vec::new()
        }
    }
}

/// Decode an optional single row, logging and defaulting on any failure.
fn row_or_none<T: DeserializeOwned>(operation: &str, result: BackendResult<Option<Row>>) -> Option<T> {
    match result {
        Ok(Some(row)) => match decode_row(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::error!(operation, error = %e, "Failed to decode row");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::error!(operation, error = %e, "Backend query failed");
            None
        }
    }
}
