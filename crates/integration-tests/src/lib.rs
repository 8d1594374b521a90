//! End-to-end tests for the Souq storefront.
//!
//! Every test starts its own storefront on an ephemeral port, backed by the
//! mock backend, and drives it with a cookie-keeping HTTP client. Nothing
//! outside the process is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p souq-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pages` - public pages render, preferences change the layout
//! - `shopper` - cart and wishlist mutations through the session
//! - `auth` - sign-in, role gates, sign-out
//! - `buyer` - order tracking and messaging
//! - `seller` - seller dashboard and product creation
//! - `router` - in-process router checks (headers, static files)

use reqwest::{Client, Response, redirect::Policy};
use souq_storefront::app;
use souq_storefront::config::StorefrontConfig;
use souq_storefront::state::AppState;
use tokio::net::TcpListener;

/// Password shared by every seeded account.
pub const DEMO_PASSWORD: &str = souq_core::mock::DEMO_PASSWORD;

/// A running storefront and a client with its own cookie jar.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront with the mock backend.
    pub async fn start() -> Self {
        Self::with_config(StorefrontConfig::mock()).await
    }

    /// Start a storefront with the given configuration.
    pub async fn with_config(config: StorefrontConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let router = app(AppState::new(config));

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        // Redirects are asserted on, never followed
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET a page and return its body, asserting a 200.
    pub async fn page(&self, path: &str) -> String {
        let resp = self.get(path).await;
        assert_eq!(resp.status(), 200, "GET {path}");
        resp.text().await.expect("Failed to read body")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Sign in through the login form and return the redirect response.
    pub async fn sign_in(&self, email: &str, password: &str) -> Response {
        self.post_form("/auth/login", &[("email", email), ("password", password)])
            .await
    }

    /// Sign in as one of the seeded accounts, asserting success.
    pub async fn sign_in_as(&self, email: &str) {
        let resp = self.sign_in(email, DEMO_PASSWORD).await;
        assert_eq!(resp.status(), 303, "sign-in as {email}");
        assert!(
            location(&resp).is_some_and(|l| !l.starts_with("/auth/login")),
            "sign-in as {email} bounced back to the login page"
        );
    }
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(resp: &Response) -> Option<&str> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
