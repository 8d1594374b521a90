//! Shopper state extractor.
//!
//! Loads the visitor's [`ShopperState`] from the session at the start of a
//! request. Handlers mutate [`Shopper::state`] and call [`Shopper::save`];
//! read-only handlers just drop it.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use souq_core::ShopperState;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;
use crate::state::AppState;

/// The current visitor's cart, wishlist, and display preferences.
pub struct Shopper {
    session: Session,
    pub state: ShopperState,
}

impl Shopper {
    /// Write the (possibly modified) state back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session
            .insert(session_keys::SHOPPER, &self.state)
            .await?;
        Ok(())
    }

    /// The underlying session, for handlers that also touch other keys.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

impl<S> FromRequestParts<S> for Shopper
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let stored = match session.get::<ShopperState>(session_keys::SHOPPER).await {
            Ok(stored) => stored,
            Err(e) => {
                // An unreadable entry (old shape, corrupt store) starts over
                tracing::warn!(error = %e, "Discarding unreadable shopper state");
                None
            }
        };

        let state = stored.unwrap_or_else(|| {
            let app = AppState::from_ref(state);
            let config = app.config();
            ShopperState::new(config.default_language, config.default_currency)
        });

        Ok(Self { session, state })
    }
}
