//! Accounts and authenticated sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, StoreId, UserId};

/// The signed-in user as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    /// Store run by this user, for sellers.
    #[serde(default)]
    pub store_id: Option<StoreId>,
}

/// A successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: String,
}

/// A row in the admin user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub joined: NaiveDate,
    #[serde(default)]
    pub orders: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}
