//! In-process backend used when no hosted backend is configured.
//!
//! Reads come back empty so pages fall through to the static seed data.
//! Writes echo what they were given. Only the seeded demo accounts can sign
//! in, all with [`DEMO_PASSWORD`](souq_core::mock::DEMO_PASSWORD).

use secrecy::ExposeSecret;
use serde_json::Value;
use souq_core::{AuthSession, AuthUser, Role, UserId, mock};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{
    Backend, BackendError, BackendResult, Credentials, Query, Row, SignUp, SignUpResponse,
    StoredObject,
};

/// Base URL for mock storage objects.
pub const MOCK_STORAGE_URL: &str = "https://mock-storage.souq.local";

/// Canned backend. Stateless; every instance behaves the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl MockBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn access_token_for(user: &AuthUser) -> String {
    format!("mock-token-{}", user.id)
}

impl Backend for MockBackend {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn sign_in_with_password(&self, credentials: &Credentials) -> BackendResult<AuthSession> {
        let user = mock::find_seeded_user(&credentials.email)
            .filter(|_| credentials.password.expose_secret() == mock::DEMO_PASSWORD)
            .ok_or(BackendError::InvalidCredentials)?;

        Ok(AuthSession {
            access_token: access_token_for(user),
            user: user.clone(),
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn sign_up(&self, request: &SignUp) -> BackendResult<SignUpResponse> {
        Ok(SignUpResponse {
            user: AuthUser {
                id: UserId::new(Uuid::new_v4().to_string()),
                email: request.email.clone(),
                name: request.name.clone(),
                role: Role::Buyer,
                store_id: None,
            },
            session: None,
        })
    }

    async fn get_session(&self, _access_token: &str) -> BackendResult<Option<AuthUser>> {
        Ok(None)
    }

    async fn sign_out(&self, _access_token: &str) -> BackendResult<()> {
        Ok(())
    }

    #[instrument(skip(self), fields(table = query.table()))]
    async fn select(&self, query: &Query) -> BackendResult<Vec<Row>> {
        debug!("mock select");
        Ok(Vec::new())
    }

    async fn single(&self, _query: &Query) -> BackendResult<Option<Row>> {
        Ok(None)
    }

    async fn count(&self, _query: &Query) -> BackendResult<u64> {
        Ok(0)
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: &str, mut row: Row) -> BackendResult<Row> {
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        Ok(row)
    }

    #[instrument(skip(self, patch), fields(table = query.table()))]
    async fn update(&self, query: &Query, mut patch: Row) -> BackendResult<Vec<Row>> {
        for (column, value) in query.filters() {
            patch
                .entry(column.clone())
                .or_insert_with(|| Value::String(value.clone()));
        }
        Ok(vec![patch])
    }

    async fn delete(&self, _query: &Query) -> BackendResult<()> {
        Ok(())
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        _bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> BackendResult<StoredObject> {
        Ok(StoredObject {
            path: path.to_string(),
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{MOCK_STORAGE_URL}/{bucket}/{path}")
    }
}
