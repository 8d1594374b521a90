//! Hosted backend client: auth, table queries, and file storage.
//!
//! # Architecture
//!
//! - [`Backend`] describes the minimal surface the storefront needs
//! - [`MockBackend`] answers from canned data and never touches the network
//! - [`LiveBackend`] speaks the hosted REST conventions over `reqwest`
//! - [`BackendClient`] is chosen once at startup from configuration and
//!   delegates to whichever implementation it holds
//!
//! Every operation returns [`BackendResult`]. Callers that must not fail
//! (the data-access helpers in `services`) collapse errors themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! use souq_storefront::backend::{Backend, BackendClient, Direction, Query};
//!
//! let client = BackendClient::from_config(config.backend.as_ref());
//! let rows = client
//!     .select(&Query::from("products").eq("store_id", "s1").order("name", Direction::Asc))
//!     .await?;
//! ```

mod live;
mod mock;
mod query;

use std::future::Future;

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use souq_core::{AuthSession, AuthUser, Email};
use thiserror::Error;
use tracing::warn;

use crate::config::BackendConfig;

pub use live::LiveBackend;
pub use mock::{MOCK_STORAGE_URL, MockBackend};
pub use query::{Direction, Query};

/// A table row as returned by the backend: a JSON object.
pub type Row = serde_json::Map<String, Value>;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Message used for every rejected sign-in, whatever the reason.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid login credentials";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Email/password pair was rejected.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Email/password sign-in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Account creation request.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: Email,
    pub password: SecretString,
    pub name: String,
}

/// Result of a sign-up.
///
/// `session` is `None` when the backend requires email confirmation before
/// the first sign-in.
#[derive(Debug, Clone)]
pub struct SignUpResponse {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Path inside the bucket.
    pub path: String,
}

/// The storefront's view of the hosted backend.
pub trait Backend: Send + Sync {
    /// Exchange an email and password for a session.
    fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = BackendResult<AuthSession>> + Send;

    fn sign_up(&self, request: &SignUp) -> impl Future<Output = BackendResult<SignUpResponse>> + Send;

    /// Resolve an access token to its user. `None` means no valid session.
    fn get_session(
        &self,
        access_token: &str,
    ) -> impl Future<Output = BackendResult<Option<AuthUser>>> + Send;

    fn sign_out(&self, access_token: &str) -> impl Future<Output = BackendResult<()>> + Send;

    fn select(&self, query: &Query) -> impl Future<Output = BackendResult<Vec<Row>>> + Send;

    /// At most one row. Zero matching rows is `Ok(None)`, not an error.
    fn single(&self, query: &Query) -> impl Future<Output = BackendResult<Option<Row>>> + Send;

    /// Number of rows matching the query's filters.
    fn count(&self, query: &Query) -> impl Future<Output = BackendResult<u64>> + Send;

    /// Insert one row and return it as stored.
    fn insert(&self, table: &str, row: Row) -> impl Future<Output = BackendResult<Row>> + Send;

    /// Apply `patch` to every row matching the query's filters.
    fn update(&self, query: &Query, patch: Row)
    -> impl Future<Output = BackendResult<Vec<Row>>> + Send;

    fn delete(&self, query: &Query) -> impl Future<Output = BackendResult<()>> + Send;

    /// Upload bytes to `bucket/path`.
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = BackendResult<StoredObject>> + Send;

    /// Public URL for an object. Pure string building; nothing is fetched.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// The backend selected at startup.
#[derive(Debug, Clone)]
pub enum BackendClient {
    Mock(MockBackend),
    Live(LiveBackend),
}

impl BackendClient {
    /// Live client when credentials are configured, mock otherwise.
    #[must_use]
    pub fn from_config(config: Option<&BackendConfig>) -> Self {
        if let Some(config) = config {
            tracing::info!(url = %config.url, "Using hosted backend");
            Self::Live(LiveBackend::new(config))
        } else {
            warn!(
                "Backend URL or anon key not configured; running with the mock backend. \
                 Set VITE_SUPABASE_URL and VITE_SUPABASE_ANON_KEY to connect."
            );
            Self::Mock(MockBackend::new())
        }
    }

    #[must_use]
    pub const fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }
}

impl Backend for BackendClient {
    async fn sign_in_with_password(&self, credentials: &Credentials) -> BackendResult<AuthSession> {
        match self {
            Self::Mock(b) => b.sign_in_with_password(credentials).await,
            Self::Live(b) => b.sign_in_with_password(credentials).await,
        }
    }

    async fn sign_up(&self, request: &SignUp) -> BackendResult<SignUpResponse> {
        match self {
            Self::Mock(b) => b.sign_up(request).await,
            Self::Live(b) => b.sign_up(request).await,
        }
    }

    async fn get_session(&self, access_token: &str) -> BackendResult<Option<AuthUser>> {
        match self {
            Self::Mock(b) => b.get_session(access_token).await,
            Self::Live(b) => b.get_session(access_token).await,
        }
    }

    async fn sign_out(&self, access_token: &str) -> BackendResult<()> {
        match self {
            Self::Mock(b) => b.sign_out(access_token).await,
            Self::Live(b) => b.sign_out(access_token).await,
        }
    }

    async fn select(&self, query: &Query) -> BackendResult<Vec<Row>> {
        match self {
            Self::Mock(b) => b.select(query).await,
            Self::Live(b) => b.select(query).await,
        }
    }

    async fn single(&self, query: &Query) -> BackendResult<Option<Row>> {
        match self {
            Self::Mock(b) => b.single(query).await,
            Self::Live(b) => b.single(query).await,
        }
    }

    async fn count(&self, query: &Query) -> BackendResult<u64> {
        match self {
            Self::Mock(b) => b.count(query).await,
            Self::Live(b) => b.count(query).await,
        }
    }

    async fn insert(&self, table: &str, row: Row) -> BackendResult<Row> {
        match self {
            Self::Mock(b) => b.insert(table, row).await,
            Self::Live(b) => b.insert(table, row).await,
        }
    }

    async fn update(&self, query: &Query, patch: Row) -> BackendResult<Vec<Row>> {
        match self {
            Self::Mock(b) => b.update(query, patch).await,
            Self::Live(b) => b.update(query, patch).await,
        }
    }

    async fn delete(&self, query: &Query) -> BackendResult<()> {
        match self {
            Self::Mock(b) => b.delete(query).await,
            Self::Live(b) => b.delete(query).await,
        }
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<StoredObject> {
        match self {
            Self::Mock(b) => b.upload(bucket, path, bytes, content_type).await,
            Self::Live(b) => b.upload(bucket, path, bytes, content_type).await,
        }
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        match self {
            Self::Mock(b) => b.public_url(bucket, path),
            Self::Live(b) => b.public_url(bucket, path),
        }
    }
}

/// Decode rows into typed records. Fails on the first row that doesn't fit.
///
/// # Errors
///
/// Returns the `serde_json` error for the first undecodable row.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, serde_json::Error> {
    rows.into_iter().map(decode_row).collect()
}

/// Decode a single row.
///
/// # Errors
///
/// Returns the `serde_json` error if the row does not match `T`.
pub fn decode_row<T: DeserializeOwned>(row: Row) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(row))
}

/// Serialize a record into a row.
///
/// # Errors
///
/// Returns an error if `value` does not serialize to a JSON object.
pub fn to_row<T: serde::Serialize>(value: &T) -> Result<Row, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected an object, got {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: String,
        name: String,
    }

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(
            BackendError::InvalidCredentials.to_string(),
            INVALID_CREDENTIALS_MESSAGE
        );
    }

    #[test]
    fn test_decode_rows() {
        let rows = vec![
            json!({"id": "a", "name": "Alpha", "extra": 1})
                .as_object()
                .cloned()
                .unwrap(),
        ];
        let decoded: Vec<Named> = decode_rows(rows).unwrap();
        assert_eq!(
            decoded,
            [Named {
                id: "a".to_string(),
                name: "Alpha".to_string()
            }]
        );

        let bad = vec![json!({"id": 3}).as_object().cloned().unwrap()];
        assert!(decode_rows::<Named>(bad).is_err());
    }

    #[test]
    fn test_to_row_rejects_non_objects() {
        assert!(to_row(&json!({"a": 1})).is_ok());
        assert!(to_row(&"plain string").is_err());
    }

    #[tokio::test]
    async fn test_client_without_config_is_mock() {
        let client = BackendClient::from_config(None);
        assert!(client.is_mock());
        assert_eq!(client.count(&Query::from("products")).await.unwrap(), 0);
    }
}
