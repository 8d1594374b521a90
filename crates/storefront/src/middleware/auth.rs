//! Authentication and role-gate extractors.
//!
//! The signed-in user lives in the session under
//! [`session_keys::CURRENT_USER`]. Anonymous visitors to a protected page are
//! redirected to the login form with a `next` parameter; signed-in users with
//! the wrong role get a 403.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use souq_core::{Role, StoreId};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Login page path.
pub const LOGIN_PATH: &str = "/auth/login";

/// Extractor that requires a signed-in user of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn orders(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Orders for {}", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a seller with a store.
pub struct RequireSeller {
    pub user: CurrentUser,
    pub store_id: StoreId,
}

/// Extractor that requires an admin.
pub struct RequireAdmin(pub CurrentUser);

/// Error returned when a page needs a user the request does not have.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login page, coming back to `next` afterwards.
    RedirectToLogin { next: String },
    /// No session layer was installed.
    Unauthorized,
    /// Signed in, but not allowed here.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { next } => Redirect::to(&login_url(&next)).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
        }
    }
}

/// Login URL that returns the user to `next` afterwards.
#[must_use]
pub fn login_url(next: &str) -> String {
    if next.is_empty() || next == "/" {
        return LOGIN_PATH.to_string();
    }
    let encoded: String = url::form_urlencoded::byte_serialize(next.as_bytes()).collect();
    format!("{LOGIN_PATH}?next={encoded}")
}

/// Only same-site absolute paths are followed after login.
///
/// Browsers drop tabs and newlines inside URLs, so any control character or
/// whitespace is rejected before the `//` check can be trusted.
#[must_use]
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| {
        n.starts_with('/')
            && !n.starts_with("//")
            && !n.contains('\\')
            && !n.chars().any(|c| c.is_control() || c.is_whitespace())
    })
}

async fn session_user(parts: &Parts) -> Result<CurrentUser, AuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| AuthRejection::RedirectToLogin {
            next: parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_string(), ToString::to_string),
        })
}

async fn user_with_role(parts: &Parts, role: Role) -> Result<CurrentUser, AuthRejection> {
    let user = session_user(parts).await?;
    if user.has_role(role) {
        Ok(user)
    } else {
        tracing::warn!(user_id = %user.id, role = %user.role, required = %role, "Role gate rejected request");
        Err(AuthRejection::Forbidden)
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireSeller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = user_with_role(parts, Role::Seller).await?;
        let store_id = user.store_id.clone().ok_or(AuthRejection::Forbidden)?;
        Ok(Self { user, store_id })
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_with_role(parts, Role::Admin).await.map(Self)
    }
}

/// Extractor that optionally gets the signed-in user.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts).await.ok()))
    }
}

/// Store the signed-in user in the session.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the signed-in user from the session (logout).
///
/// Cart and wishlist stay with the browser session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    session
        .remove::<serde_json::Value>(session_keys::OUTBOX)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_encodes_next() {
        assert_eq!(login_url("/"), "/auth/login");
        assert_eq!(login_url("/seller"), "/auth/login?next=%2Fseller");
        assert_eq!(
            login_url("/orders?status=shipped"),
            "/auth/login?next=%2Forders%3Fstatus%3Dshipped"
        );
    }

    #[test]
    fn test_safe_next_rejects_offsite_targets() {
        assert_eq!(safe_next(Some("/orders")), Some("/orders"));
        assert_eq!(safe_next(Some("//evil.example")), None);
        assert_eq!(safe_next(Some("https://evil.example")), None);
        assert_eq!(safe_next(Some("/\\evil.example")), None);
        assert_eq!(safe_next(None), None);
    }

    #[test]
    fn test_safe_next_rejects_control_characters() {
        assert_eq!(safe_next(Some("/\t/evil.example")), None);
        assert_eq!(safe_next(Some("/\n/evil.example")), None);
        assert_eq!(safe_next(Some("/\r\n/evil.example")), None);
        assert_eq!(safe_next(Some("/orders\nSet-Cookie: x=1")), None);
        assert_eq!(safe_next(Some("/ /evil.example")), None);
        assert_eq!(
            safe_next(Some("/products?q=red%20tagine")),
            Some("/products?q=red%20tagine")
        );
    }

    #[test]
    fn test_rejection_statuses() {
        let redirect = AuthRejection::RedirectToLogin {
            next: "/admin".to_string(),
        }
        .into_response();
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            redirect.headers().get("location").map(|v| v.as_bytes()),
            Some(&b"/auth/login?next=%2Fadmin"[..])
        );
        assert_eq!(
            AuthRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
