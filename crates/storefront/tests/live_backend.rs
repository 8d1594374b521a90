//! Tests for `LiveBackend` against a local `wiremock` server.
//!
//! Each test stands up its own server, so no real network traffic is made.
//! They cover the request shapes the REST, auth, and storage APIs expect and
//! the way each failure status maps onto `BackendError`.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use souq_core::{ConversationId, ProductId, Role, Sender, StoreId, UserId, mock};
use souq_storefront::backend::{
    Backend, BackendError, Credentials, Direction, LiveBackend, Query, to_row,
};
use souq_storefront::config::BackendConfig;
use souq_storefront::services::{catalog, messages, orders};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "test-anon-key";

fn backend_for(server: &MockServer) -> LiveBackend {
    let config = BackendConfig::new(&server.uri(), ANON_KEY).unwrap();
    LiveBackend::new(&config)
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: SecretString::from(password.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sign_in_returns_session_with_metadata_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON_KEY))
        .and(body_json(json!({"email": "seller@souq.test", "password": "password"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-123",
            "token_type": "bearer",
            "user": {
                "id": "u-seller",
                "email": "seller@souq.test",
                "user_metadata": {"name": "Karim"},
                "app_metadata": {"provider": "email", "role": "seller", "store_id": "s1"}
            }
        })))
        .mount(&server)
        .await;

    let session = backend_for(&server)
        .sign_in_with_password(&credentials(" seller@souq.test ", "password"))
        .await
        .unwrap();

    assert_eq!(session.access_token, "jwt-123");
    assert_eq!(session.user.name, "Karim");
    assert_eq!(session.user.role, Role::Seller);
    assert_eq!(session.user.store_id.as_ref().map(|s| s.as_str()), Some("s1"));
}

#[tokio::test]
async fn sign_in_bad_request_is_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let result = backend_for(&server)
        .sign_in_with_password(&credentials("buyer@souq.test", "wrong"))
        .await;

    assert!(
        matches!(result, Err(BackendError::InvalidCredentials)),
        "expected InvalidCredentials, got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let result = backend_for(&server)
        .sign_in_with_password(&credentials("buyer@souq.test", "password"))
        .await;

    assert!(
        matches!(result, Err(BackendError::RateLimited(7))),
        "expected RateLimited(7), got: {result:?}"
    );
}

#[tokio::test]
async fn self_assigned_role_is_ignored() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer jwt-buyer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-buyer",
            "email": "buyer@souq.test",
            "user_metadata": {"name": "Amal", "role": "admin", "store_id": "s1"},
            "app_metadata": {"provider": "email"}
        })))
        .mount(&server)
        .await;

    let user = backend_for(&server)
        .get_session("jwt-buyer")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, Role::Buyer);
    assert!(user.store_id.is_none());
}

#[tokio::test]
async fn get_session_unauthorized_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer expired-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let user = backend_for(&server).get_session("expired-token").await.unwrap();
    assert!(user.is_none());
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[tokio::test]
async fn select_sends_rest_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .and(query_param("user_id", "eq.u-buyer"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "ORD-1"},
            {"id": "ORD-2"}
        ])))
        .mount(&server)
        .await;

    let query = Query::from("orders")
        .eq("user_id", "u-buyer")
        .order("created_at", Direction::Desc)
        .limit(2);
    let rows = backend_for(&server).select(&query).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows.first().and_then(|r| r.get("id")), Some(&json!("ORD-1")));
}

#[tokio::test]
async fn single_not_acceptable_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/stores"))
        .and(header("accept", "application/vnd.pgrst.object+json"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .mount(&server)
        .await;

    let query = Query::from("stores").eq("id", "s404");
    let row = backend_for(&server).single(&query).await.unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn count_reads_content_range_total() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/reviews"))
        .and(query_param("product_id", "eq.p1"))
        .and(header("prefer", "count=exact"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-11/12"))
        .mount(&server)
        .await;

    let query = Query::from("reviews").eq("product_id", "p1");
    assert_eq!(backend_for(&server).count(&query).await.unwrap(), 12);
}

#[tokio::test]
async fn server_error_keeps_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "relation missing"})),
        )
        .mount(&server)
        .await;

    let result = backend_for(&server).select(&Query::from("products")).await;
    match result {
        Err(BackendError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "relation missing");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Services over the live client
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_decodes_product_rows() {
    let server = MockServer::start().await;
    let seed = mock::get_product_by_id("p1").unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(to_row(seed).unwrap()))
        .mount(&server)
        .await;

    let product = catalog::fetch_product_by_id(&backend_for(&server), &ProductId::new("p1")).await;
    assert_eq!(product.as_ref(), Some(seed));
}

#[tokio::test]
async fn catalog_degrades_to_empty_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(catalog::fetch_products(&backend_for(&server)).await.is_empty());
}

/// A server that answers every request with `status` and `body`.
async fn failing_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn list_helpers_degrade_to_empty() {
    for (status, body) in [(500, "boom"), (200, "not json"), (200, r#"[{"id": 3}]"#)] {
        let server = failing_server(status, body).await;
        let backend = backend_for(&server);
        let case = format!("{status} {body}");

        assert!(catalog::fetch_stores(&backend).await.is_empty(), "{case}");
        assert!(
            catalog::fetch_products_by_store(&backend, &StoreId::new("s1"))
                .await
                .is_empty(),
            "{case}"
        );
        assert!(
            orders::fetch_user_orders(&backend, &UserId::new("u-buyer"))
                .await
                .is_empty(),
            "{case}"
        );
        assert!(
            orders::fetch_store_orders(&backend, &StoreId::new("s1"))
                .await
                .is_empty(),
            "{case}"
        );
        assert!(orders::fetch_all_orders(&backend).await.is_empty(), "{case}");
    }
}

#[tokio::test]
async fn by_id_helpers_degrade_to_none() {
    for (status, body) in [(502, "bad gateway"), (200, "not json"), (200, r#"{"id": 3}"#)] {
        let server = failing_server(status, body).await;
        let backend = backend_for(&server);
        let case = format!("{status} {body}");

        assert!(
            catalog::fetch_product_by_id(&backend, &ProductId::new("p1"))
                .await
                .is_none(),
            "{case}"
        );
        assert!(
            catalog::fetch_store_by_id(&backend, &StoreId::new("s1"))
                .await
                .is_none(),
            "{case}"
        );
    }
}

#[tokio::test]
async fn review_count_degrades_to_zero() {
    let server = failing_server(500, "boom").await;
    let count = catalog::fetch_review_count(&backend_for(&server), &ProductId::new("p1")).await;
    assert_eq!(count, 0);
}

#[tokio::test]
async fn writes_return_the_submitted_value_on_failure() {
    for (status, body) in [(500, "boom"), (201, "not json")] {
        let server = failing_server(status, body).await;
        let backend = backend_for(&server);
        let case = format!("{status} {body}");

        let sent = messages::send_message(
            &backend,
            &ConversationId::new("c1"),
            Sender::Buyer,
            "  Is the blue one in stock?  ",
        )
        .await;
        assert_eq!(sent.body, "Is the blue one in stock?", "{case}");
        assert_eq!(sent.conversation_id, Some(ConversationId::new("c1")), "{case}");
        assert_eq!(sent.sender, Sender::Buyer, "{case}");

        let draft = mock::get_product_by_id("p1").unwrap().clone();
        let created = catalog::create_product(&backend, draft.clone()).await;
        assert_eq!(created, draft, "{case}");
    }
}

#[tokio::test]
async fn failed_upload_has_no_url() {
    let server = failing_server(413, r#"{"message": "Payload too large"}"#).await;
    let url = catalog::upload_product_image(
        &backend_for(&server),
        &StoreId::new("s1"),
        "photo.png",
        vec![0; 16],
        "image/png",
    )
    .await;
    assert!(url.is_none());
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_posts_bytes_and_returns_public_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/product-images/s1/photo.png"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "product-images/s1/photo.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let url = catalog::upload_product_image(
        &backend,
        &"s1".into(),
        "photo.png",
        vec![0x89, b'P', b'N', b'G'],
        "image/png",
    )
    .await
    .unwrap();

    assert_eq!(
        url,
        format!("{}/storage/v1/object/public/product-images/s1/photo.png", server.uri())
    );
}
