//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use souq_core::{AuthSession, AuthUser, Email, Role, StoreId, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user and
/// gate role-specific pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    /// Store run by this user, for sellers.
    pub store_id: Option<StoreId>,
    /// Backend access token, forwarded on sign-out.
    pub access_token: String,
}

impl CurrentUser {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

impl From<AuthSession> for CurrentUser {
    fn from(session: AuthSession) -> Self {
        let AuthUser {
            id,
            email,
            name,
            role,
            store_id,
        } = session.user;
        Self {
            id,
            email,
            name,
            role,
            store_id,
            access_token: session.access_token,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopper's cart, wishlist, and preferences.
    pub const SHOPPER: &str = "shopper";

    /// Key for messages sent during this session, shown in their threads.
    pub const OUTBOX: &str = "outbox";
}
