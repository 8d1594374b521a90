//! Orders as seen by buyers, sellers, and admins.
//!
//! All three dashboards share one record shape. Buyer views ignore the
//! customer fields; seller views are filtered by `store_id`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, OrderId, OrderStatus, Price, ProductId, StoreId, UserId};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub status: OrderStatus,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub shipping: Option<ShippingInfo>,
    #[serde(default)]
    pub payment: Option<PaymentInfo>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Delivery details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub estimated_delivery: Option<NaiveDate>,
}

/// Payment summary (never the full card number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub method: String,
    #[serde(default)]
    pub last4: Option<String>,
    #[serde(default)]
    pub paid: bool,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl Order {
    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    #[must_use]
    pub fn shipping_cost(&self) -> Decimal {
        self.shipping.as_ref().map_or(Decimal::ZERO, |s| s.cost)
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.shipping_cost()
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::new(self.total(), self.currency)
    }

    /// Total converted into `currency` at the reference rates.
    #[must_use]
    pub fn total_in(&self, currency: CurrencyCode) -> Decimal {
        self.total_price().convert_to(currency).amount
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    #[must_use]
    pub fn belongs_to_store(&self, store_id: &StoreId) -> bool {
        self.store_id.as_ref() == Some(store_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            id: ProductId::new("p1"),
            name: "Item".to_string(),
            price: Decimal::new(price, 2),
            quantity,
            image: None,
        }
    }

    #[test]
    fn test_totals_include_shipping() {
        let order = Order {
            id: OrderId::new("o-1"),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default(),
            status: OrderStatus::Processing,
            currency: CurrencyCode::USD,
            items: vec![item(1000, 2), item(550, 1)],
            user_id: None,
            customer_name: None,
            customer_email: None,
            store_id: Some(StoreId::new("s1")),
            store_name: None,
            shipping: Some(ShippingInfo {
                name: "Layla".to_string(),
                address: "12 Palm St".to_string(),
                city: "Dubai".to_string(),
                country: "AE".to_string(),
                method: "standard".to_string(),
                cost: Decimal::new(500, 2),
                tracking_number: None,
                estimated_delivery: None,
            }),
            payment: None,
        };

        assert_eq!(order.subtotal(), Decimal::new(2550, 2));
        assert_eq!(order.total(), Decimal::new(3050, 2));
        assert_eq!(order.item_count(), 3);
        assert!(order.belongs_to_store(&StoreId::new("s1")));
        assert!(!order.belongs_to_store(&StoreId::new("s2")));
    }
}
