//! Demo accounts and the admin user table.

use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::models::{Account, AuthUser};
use crate::types::{Email, Role, StoreId, UserId};

/// Password shared by every seeded demo account.
pub const DEMO_PASSWORD: &str = "password";

struct AccountSeed {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    role: Role,
    joined: (i32, u32, u32),
    orders: u32,
    active: bool,
    store: Option<&'static str>,
}

const ACCOUNT_SEEDS: &[AccountSeed] = &[
    AccountSeed {
        id: "u-buyer",
        name: "Layla Haddad",
        email: "buyer@souq.test",
        role: Role::Buyer,
        joined: (2025, 8, 12),
        orders: 5,
        active: true,
        store: None,
    },
    AccountSeed {
        id: "u-seller",
        name: "Youssef Amrani",
        email: "seller@souq.test",
        role: Role::Seller,
        joined: (2023, 3, 10),
        orders: 0,
        active: true,
        store: Some("s1"),
    },
    AccountSeed {
        id: "u-admin",
        name: "Nadia Karim",
        email: "admin@souq.test",
        role: Role::Admin,
        joined: (2021, 1, 4),
        orders: 0,
        active: true,
        store: None,
    },
    AccountSeed {
        id: "u-omar",
        name: "Omar Benali",
        email: "omar.benali@example.com",
        role: Role::Buyer,
        joined: (2025, 10, 2),
        orders: 3,
        active: true,
        store: None,
    },
    AccountSeed {
        id: "u-claire",
        name: "Claire Martin",
        email: "claire.martin@example.com",
        role: Role::Buyer,
        joined: (2025, 11, 23),
        orders: 2,
        active: true,
        store: None,
    },
    AccountSeed {
        id: "u-sara",
        name: "Sara Al-Qahtani",
        email: "sara.q@example.com",
        role: Role::Buyer,
        joined: (2026, 1, 5),
        orders: 3,
        active: true,
        store: None,
    },
    AccountSeed {
        id: "u-hassan",
        name: "Hassan Fathy",
        email: "hassan@nilecotton.eg",
        role: Role::Seller,
        joined: (2022, 8, 30),
        orders: 0,
        active: true,
        store: Some("s2"),
    },
    AccountSeed {
        id: "u-karim",
        name: "Karim Idrissi",
        email: "karim.idrissi@example.com",
        role: Role::Buyer,
        joined: (2024, 6, 17),
        orders: 0,
        active: false,
        store: None,
    },
];

/// Seeded accounts that can sign in with [`DEMO_PASSWORD`].
const DEMO_LOGINS: [&str; 3] = ["u-buyer", "u-seller", "u-admin"];

static ACCOUNTS: LazyLock<Vec<Account>> = LazyLock::new(|| {
    ACCOUNT_SEEDS
        .iter()
        .filter_map(|seed| {
            let (y, m, d) = seed.joined;
            Some(Account {
                id: UserId::new(seed.id),
                name: seed.name.to_string(),
                email: Email::parse(seed.email).ok()?,
                role: seed.role,
                joined: NaiveDate::from_ymd_opt(y, m, d)?,
                orders: seed.orders,
                active: seed.active,
            })
        })
        .collect()
});

static SEEDED_USERS: LazyLock<Vec<AuthUser>> = LazyLock::new(|| {
    ACCOUNT_SEEDS
        .iter()
        .filter(|seed| DEMO_LOGINS.contains(&seed.id))
        .filter_map(|seed| {
            Some(AuthUser {
                id: UserId::new(seed.id),
                email: Email::parse(seed.email).ok()?,
                name: seed.name.to_string(),
                role: seed.role,
                store_id: seed.store.map(StoreId::new),
            })
        })
        .collect()
});

/// Rows for the admin user table.
#[must_use]
pub fn accounts() -> &'static [Account] {
    &ACCOUNTS
}

/// The demo logins: one buyer, one seller, one admin.
#[must_use]
pub fn seeded_users() -> &'static [AuthUser] {
    &SEEDED_USERS
}

/// Look up a demo login by email, case-insensitively.
#[must_use]
pub fn find_seeded_user(email: &str) -> Option<&'static AuthUser> {
    let email = email.trim();
    seeded_users()
        .iter()
        .find(|u| u.email.as_str().eq_ignore_ascii_case(email))
}
