//! Catalog products.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, ProductId, StoreId};

/// Stock level at or below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A product listed by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Listing price in `currency`.
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub store_id: StoreId,
    #[serde(default)]
    pub store_name: String,
    /// Average review score, 0.0 to 5.0.
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    /// Price before the current discount, if the product is on sale.
    #[serde(default)]
    pub old_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

impl Product {
    /// Current price with its currency.
    #[must_use]
    pub const fn price(&self) -> Price {
        Price::new(self.price, self.currency)
    }

    /// Pre-discount price with its currency.
    #[must_use]
    pub fn old_price(&self) -> Option<Price> {
        self.old_price.map(|amount| Price::new(amount, self.currency))
    }

    /// Whole-percent discount relative to `old_price`.
    ///
    /// Returns `None` when there is no old price or it is not higher than
    /// the current price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let old = self.old_price?;
        if old <= self.price || old.is_zero() {
            return None;
        }
        ((old - self.price) / old * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= LOW_STOCK_THRESHOLD
    }

    /// First image, used for cards and cart lines.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
