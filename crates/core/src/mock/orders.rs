//! Seed orders for the buyer history, the seller dashboard, and the admin table.
//!
//! Line items reference seed products by id; names and prices are copied from
//! the catalog when the table is built.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Order, OrderItem, PaymentInfo, ShippingInfo};
use crate::types::{CurrencyCode, OrderId, OrderStatus, StoreId, UserId};

struct Customer {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    address: &'static str,
    city: &'static str,
    country: &'static str,
}

const CUSTOMERS: &[Customer] = &[
    Customer {
        id: "u-buyer",
        name: "Layla Haddad",
        email: "buyer@souq.test",
        address: "14 Palm Jumeirah Rd",
        city: "Dubai",
        country: "AE",
    },
    Customer {
        id: "u-omar",
        name: "Omar Benali",
        email: "omar.benali@example.com",
        address: "7 Rue Ibn Batouta",
        city: "Casablanca",
        country: "MA",
    },
    Customer {
        id: "u-claire",
        name: "Claire Martin",
        email: "claire.martin@example.com",
        address: "22 Rue de la République",
        city: "Lyon",
        country: "FR",
    },
    Customer {
        id: "u-sara",
        name: "Sara Al-Qahtani",
        email: "sara.q@example.com",
        address: "Olaya St 301",
        city: "Riyadh",
        country: "SA",
    },
];

struct OrderSeed {
    id: &'static str,
    date: (i32, u32, u32),
    status: OrderStatus,
    customer: &'static str,
    store: &'static str,
    lines: &'static [(&'static str, u32)],
    shipping_cents: i64,
    tracking: Option<&'static str>,
    card: &'static str,
}

const ORDER_SEEDS: &[OrderSeed] = &[
    // Buyer history
    OrderSeed {
        id: "o-1001",
        date: (2026, 5, 14),
        status: OrderStatus::Pending,
        customer: "u-buyer",
        store: "s3",
        lines: &[("p5", 2), ("p15", 1)],
        shipping_cents: 700,
        tracking: None,
        card: "4242",
    },
    OrderSeed {
        id: "o-1002",
        date: (2026, 5, 3),
        status: OrderStatus::Shipped,
        customer: "u-buyer",
        store: "s2",
        lines: &[("p3", 2)],
        shipping_cents: 900,
        tracking: Some("EG1002339911"),
        card: "4242",
    },
    OrderSeed {
        id: "o-1003",
        date: (2026, 4, 11),
        status: OrderStatus::Delivered,
        customer: "u-buyer",
        store: "s1",
        lines: &[("p1", 1), ("p2", 1)],
        shipping_cents: 1200,
        tracking: Some("MA1003775420"),
        card: "4242",
    },
    OrderSeed {
        id: "o-1004",
        date: (2026, 3, 22),
        status: OrderStatus::Cancelled,
        customer: "u-buyer",
        store: "s4",
        lines: &[("p7", 1)],
        shipping_cents: 1500,
        tracking: None,
        card: "0005",
    },
    OrderSeed {
        id: "o-1005",
        date: (2026, 2, 9),
        status: OrderStatus::Delivered,
        customer: "u-buyer",
        store: "s5",
        lines: &[("p9", 3), ("p16", 1)],
        shipping_cents: 600,
        tracking: Some("FR1005002211"),
        card: "4242",
    },
    // Atlas Pottery (s1) sales
    OrderSeed {
        id: "o-2001",
        date: (2025, 12, 6),
        status: OrderStatus::Delivered,
        customer: "u-omar",
        store: "s1",
        lines: &[("p13", 2)],
        shipping_cents: 500,
        tracking: Some("MA2001118800"),
        card: "1881",
    },
    OrderSeed {
        id: "o-2002",
        date: (2026, 1, 17),
        status: OrderStatus::Delivered,
        customer: "u-claire",
        store: "s1",
        lines: &[("p1", 1), ("p13", 1)],
        shipping_cents: 1400,
        tracking: Some("MA2002450190"),
        card: "3220",
    },
    OrderSeed {
        id: "o-2003",
        date: (2026, 2, 2),
        status: OrderStatus::Cancelled,
        customer: "u-sara",
        store: "s1",
        lines: &[("p2", 4)],
        shipping_cents: 800,
        tracking: None,
        card: "7310",
    },
    OrderSeed {
        id: "o-2004",
        date: (2026, 3, 9),
        status: OrderStatus::Delivered,
        customer: "u-omar",
        store: "s1",
        lines: &[("p1", 2)],
        shipping_cents: 500,
        tracking: Some("MA2004660022"),
        card: "1881",
    },
    OrderSeed {
        id: "o-2005",
        date: (2026, 4, 19),
        status: OrderStatus::Shipped,
        customer: "u-sara",
        store: "s1",
        lines: &[("p13", 1), ("p2", 2)],
        shipping_cents: 800,
        tracking: Some("MA2005987001"),
        card: "7310",
    },
    OrderSeed {
        id: "o-2006",
        date: (2026, 5, 1),
        status: OrderStatus::Processing,
        customer: "u-claire",
        store: "s1",
        lines: &[("p1", 1)],
        shipping_cents: 1400,
        tracking: None,
        card: "3220",
    },
    OrderSeed {
        id: "o-2007",
        date: (2026, 5, 12),
        status: OrderStatus::Pending,
        customer: "u-omar",
        store: "s1",
        lines: &[("p2", 2), ("p13", 1)],
        shipping_cents: 500,
        tracking: None,
        card: "1881",
    },
    OrderSeed {
        id: "o-2008",
        date: (2026, 5, 16),
        status: OrderStatus::Pending,
        customer: "u-sara",
        store: "s1",
        lines: &[("p1", 1), ("p2", 1)],
        shipping_cents: 800,
        tracking: None,
        card: "7310",
    },
];

fn build(seed: &OrderSeed) -> Option<Order> {
    let customer = CUSTOMERS.iter().find(|c| c.id == seed.customer)?;
    let (y, m, d) = seed.date;
    let date = NaiveDate::from_ymd_opt(y, m, d)?;

    let items = seed
        .lines
        .iter()
        .filter_map(|(product_id, quantity)| {
            let product = super::get_product_by_id(product_id)?;
            Some(OrderItem {
                id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: *quantity,
                image: product.primary_image().map(String::from),
            })
        })
        .collect();

    let in_transit = matches!(seed.status, OrderStatus::Shipped | OrderStatus::Processing);
    Some(Order {
        id: OrderId::new(seed.id),
        date,
        status: seed.status,
        currency: CurrencyCode::USD,
        items,
        user_id: Some(UserId::new(customer.id)),
        customer_name: Some(customer.name.to_string()),
        customer_email: Some(customer.email.to_string()),
        store_id: Some(StoreId::new(seed.store)),
        store_name: Some(super::stores::store_name(seed.store).to_string()),
        shipping: Some(ShippingInfo {
            name: customer.name.to_string(),
            address: customer.address.to_string(),
            city: customer.city.to_string(),
            country: customer.country.to_string(),
            method: "standard".to_string(),
            cost: Decimal::new(seed.shipping_cents, 2),
            tracking_number: seed.tracking.map(String::from),
            estimated_delivery: in_transit
                .then(|| date.checked_add_days(Days::new(7)))
                .flatten(),
        }),
        payment: Some(PaymentInfo {
            method: "card".to_string(),
            last4: Some(seed.card.to_string()),
            paid: seed.status != OrderStatus::Cancelled,
        }),
    })
}

static ORDERS: LazyLock<Vec<Order>> = LazyLock::new(|| ORDER_SEEDS.iter().filter_map(build).collect());

/// Every seed order, newest buyer orders first, then the seller history.
#[must_use]
pub fn all_orders() -> &'static [Order] {
    &ORDERS
}

/// Orders placed by one user.
#[must_use]
pub fn buyer_orders(user_id: &str) -> Vec<Order> {
    all_orders()
        .iter()
        .filter(|o| o.user_id.as_ref().is_some_and(|u| u == user_id))
        .cloned()
        .collect()
}

/// Orders received by one store.
#[must_use]
pub fn seller_orders(store_id: &str) -> Vec<Order> {
    all_orders()
        .iter()
        .filter(|o| o.store_id.as_ref().is_some_and(|s| s == store_id))
        .cloned()
        .collect()
}
