//! Seller storefronts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{StoreId, UserId};

/// A seller's store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    /// ISO 3166 alpha-2 country code.
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact: StoreContact,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

/// Public contact details shown on a storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreContact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Store {
    /// Two-letter monogram used when a store has no logo.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        let store: Store = serde_json::from_value(serde_json::json!({
            "id": "s9",
            "name": "atlas craft house"
        }))
        .unwrap();
        assert_eq!(store.initials(), "AC");
        assert_eq!(store.contact, StoreContact::default());
        assert!(!store.verified);
    }
}
