//! In-process router checks that need no network.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use souq_storefront::app;
use souq_storefront::config::StorefrontConfig;
use souq_storefront::state::AppState;
use tower::ServiceExt;

fn router() -> axum::Router {
    app(AppState::new(StorefrontConfig::mock()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default()
}

#[tokio::test]
async fn pages_carry_security_headers() {
    let resp = router().oneshot(get("/")).await.unwrap_or_else(|e| match e {});

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(headers.get("x-frame-options").map(|v| v.as_bytes()), Some(&b"DENY"[..]));
    assert_eq!(
        headers.get("x-content-type-options").map(|v| v.as_bytes()),
        Some(&b"nosniff"[..])
    );
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(
        headers.get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
        Some(&b"no-store, max-age=0"[..])
    );
}

#[tokio::test]
async fn request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-abc")
        .body(Body::empty())
        .unwrap_or_default();
    let resp = router().oneshot(request).await.unwrap_or_else(|e| match e {});

    assert_eq!(
        resp.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"trace-abc"[..])
    );
}

#[tokio::test]
async fn stylesheet_is_served() {
    let resp = router()
        .oneshot(get("/static/css/main.css"))
        .await
        .unwrap_or_else(|e| match e {});

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key(header::CACHE_CONTROL));
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap_or_default();
    assert!(!body.is_empty());
}

#[tokio::test]
async fn session_cookie_is_http_only() {
    let request = Request::builder()
        .method("POST")
        .uri("/cart/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("product_id=p1"))
        .unwrap_or_default();
    let resp = router().oneshot(request).await.unwrap_or_else(|e| match e {});

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.starts_with("souq_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}
