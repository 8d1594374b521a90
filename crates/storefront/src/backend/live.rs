//! Hosted backend client over the REST, auth, and storage HTTP APIs.
//!
//! One attempt per call: no retries, no caching. Rate limiting surfaces as
//! [`BackendError::RateLimited`] with the server's `Retry-After`.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use souq_core::{AuthSession, AuthUser, Email, Role, StoreId, UserId};
use tracing::{debug, instrument};
use url::Url;

use super::{
    Backend, BackendError, BackendResult, Credentials, Query, Row, SignUp, SignUpResponse,
    StoredObject,
};
use crate::config::BackendConfig;

/// `Accept` value that asks for a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Longest error body excerpt kept in [`BackendError::Api`].
const MAX_ERROR_BODY: usize = 200;

/// Client for a hosted backend project.
#[derive(Clone)]
pub struct LiveBackend {
    inner: Arc<LiveBackendInner>,
}

struct LiveBackendInner {
    client: reqwest::Client,
    base_url: Url,
    anon_key: SecretString,
}

impl std::fmt::Debug for LiveBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveBackend")
            .field("base_url", &self.inner.base_url.as_str())
            .field("anon_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: String,
    email: Email,
    #[serde(default)]
    user_metadata: UserMetadata,
    #[serde(default)]
    app_metadata: AppMetadata,
}

/// Profile fields the account holder can edit.
#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    name: Option<String>,
}

/// Fields only the service role can write. Roles and store ownership are
/// read from here, never from `user_metadata`.
#[derive(Debug, Default, Deserialize)]
struct AppMetadata {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    store_id: Option<StoreId>,
}

impl From<RemoteUser> for AuthUser {
    fn from(user: RemoteUser) -> Self {
        let name = user
            .user_metadata
            .name
            .unwrap_or_else(|| user.email.local_part().to_string());
        // Unknown role strings fall back to the least privileged role
        let role = user
            .app_metadata
            .role
            .as_deref()
            .and_then(|r| r.parse::<Role>().ok())
            .unwrap_or_default();
        Self {
            id: UserId::new(user.id),
            email: user.email,
            name,
            role,
            store_id: user.app_metadata.store_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: RemoteUser,
}

/// Sign-up answers with a session when confirmation is off, or with the bare
/// user when an email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(TokenResponse),
    Wrapped { user: RemoteUser },
    Bare(RemoteUser),
}

// =============================================================================
// Client
// =============================================================================

impl LiveBackend {
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Use a preconfigured `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(LiveBackendInner {
                client,
                base_url: config.url.clone(),
                anon_key: config.anon_key.clone(),
            }),
        }
    }

    /// Absolute URL for a path under the project root.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Request with the project key and a bearer token (the anon key when
    /// no user token is given).
    fn request(&self, method: Method, path: &str, bearer: Option<&str>) -> RequestBuilder {
        let key = self.inner.anon_key.expose_secret();
        self.inner
            .client
            .request(method, self.url(path))
            .header("apikey", key)
            .bearer_auth(bearer.unwrap_or(key))
    }

    fn table_path(table: &str) -> String {
        format!("rest/v1/{table}")
    }
}

/// Turn rate limiting and non-success statuses into errors.
async fn check(response: Response) -> BackendResult<Response> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(BackendError::RateLimited(retry_after));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::error!(status = %status, message = %message, "Backend returned non-success status");
        return Err(BackendError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str).map(String::from))
    });
    from_json.unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect())
}

/// Parse the total from a `Content-Range` header such as `0-9/42` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> BackendResult<T> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

impl Backend for LiveBackend {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn sign_in_with_password(&self, credentials: &Credentials) -> BackendResult<AuthSession> {
        let response = self
            .request(Method::POST, "auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&json!({
                "email": credentials.email.trim(),
                "password": credentials.password.expose_secret(),
            }))
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Err(BackendError::InvalidCredentials);
        }

        let token: TokenResponse = json_body(check(response).await?).await?;
        Ok(AuthSession {
            access_token: token.access_token,
            user: token.user.into(),
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn sign_up(&self, request: &SignUp) -> BackendResult<SignUpResponse> {
        let response = self
            .request(Method::POST, "auth/v1/signup", None)
            .json(&json!({
                "email": request.email.as_str(),
                "password": request.password.expose_secret(),
                "data": { "name": request.name },
            }))
            .send()
            .await?;

        let body: SignUpBody = json_body(check(response).await?).await?;
        Ok(match body {
            SignUpBody::Session(token) => {
                let user: AuthUser = token.user.into();
                SignUpResponse {
                    session: Some(AuthSession {
                        access_token: token.access_token,
                        user: user.clone(),
                    }),
                    user,
                }
            }
            SignUpBody::Wrapped { user } | SignUpBody::Bare(user) => SignUpResponse {
                user: user.into(),
                session: None,
            },
        })
    }

    #[instrument(skip_all)]
    async fn get_session(&self, access_token: &str) -> BackendResult<Option<AuthUser>> {
        let response = self
            .request(Method::GET, "auth/v1/user", Some(access_token))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let user: RemoteUser = json_body(check(response).await?).await?;
        Ok(Some(user.into()))
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> BackendResult<()> {
        let response = self
            .request(Method::POST, "auth/v1/logout", Some(access_token))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(table = query.table()))]
    async fn select(&self, query: &Query) -> BackendResult<Vec<Row>> {
        let response = self
            .request(Method::GET, &Self::table_path(query.table()), None)
            .query(&query.to_params())
            .send()
            .await?;
        let rows: Vec<Row> = json_body(check(response).await?).await?;
        debug!(rows = rows.len(), "select");
        Ok(rows)
    }

    #[instrument(skip(self), fields(table = query.table()))]
    async fn single(&self, query: &Query) -> BackendResult<Option<Row>> {
        let response = self
            .request(Method::GET, &Self::table_path(query.table()), None)
            .query(&query.to_params())
            .header(header::ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        // Zero (or several) rows for a single-object request
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }

        Ok(Some(json_body(check(response).await?).await?))
    }

    #[instrument(skip(self), fields(table = query.table()))]
    async fn count(&self, query: &Query) -> BackendResult<u64> {
        let response = self
            .request(Method::HEAD, &Self::table_path(query.table()), None)
            .query(&query.filter_params())
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = check(response).await?;

        let range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        parse_content_range_total(range).ok_or_else(|| BackendError::Api {
            status: response.status().as_u16(),
            message: format!("missing or malformed Content-Range: {range:?}"),
        })
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: &str, row: Row) -> BackendResult<Row> {
        let response = self
            .request(Method::POST, &Self::table_path(table), None)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        let mut rows: Vec<Row> = json_body(check(response).await?).await?;
        // An empty representation still means the insert went through
        Ok(if rows.is_empty() { row } else { rows.swap_remove(0) })
    }

    #[instrument(skip(self, patch), fields(table = query.table()))]
    async fn update(&self, query: &Query, patch: Row) -> BackendResult<Vec<Row>> {
        let response = self
            .request(Method::PATCH, &Self::table_path(query.table()), None)
            .query(&query.filter_params())
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        json_body(check(response).await?).await
    }

    #[instrument(skip(self), fields(table = query.table()))]
    async fn delete(&self, query: &Query) -> BackendResult<()> {
        let response = self
            .request(Method::DELETE, &Self::table_path(query.table()), None)
            .query(&query.filter_params())
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<StoredObject> {
        let response = self
            .request(Method::POST, &format!("storage/v1/object/{bucket}/{path}"), None)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        check(response).await?;
        Ok(StoredObject {
            path: path.to_string(),
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.url(&format!("storage/v1/object/public/{bucket}/{path}"))
    }
}
