//! Public pages render with the mock backend and follow display preferences.

use souq_integration_tests::{TestContext, location};

#[tokio::test]
async fn public_pages_render() {
    let ctx = TestContext::start().await;

    for path in [
        "/",
        "/products",
        "/products?q=tagine&sort=price-asc",
        "/products?category=ceramics&in_stock=1&page=1",
        "/products/p1",
        "/stores",
        "/stores?verified=1",
        "/stores/s1",
        "/cart",
        "/wishlist",
        "/auth/login",
        "/auth/register",
    ] {
        let body = ctx.page(path).await;
        assert!(body.contains("<html"), "{path} did not render a page");
    }
}

#[tokio::test]
async fn health_check() {
    let ctx = TestContext::start().await;
    let resp = ctx.get("/health").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap_or_default(), "ok");
}

#[tokio::test]
async fn product_page_shows_store_and_price() {
    let ctx = TestContext::start().await;
    let body = ctx.page("/products/p1").await;

    assert!(body.contains("Hand-painted Tagine"));
    assert!(body.contains("/stores/s1"));
    assert!(body.contains("$45.00"));
}

#[tokio::test]
async fn unknown_records_are_not_found() {
    let ctx = TestContext::start().await;

    assert_eq!(ctx.get("/products/p404").await.status(), 404);
    assert_eq!(ctx.get("/stores/s404").await.status(), 404);
    assert_eq!(ctx.get("/no-such-page").await.status(), 404);
}

#[tokio::test]
async fn search_without_matches_says_so() {
    let ctx = TestContext::start().await;
    let body = ctx.page("/products?q=zzzz-no-match").await;
    assert!(body.contains("No products match your search."));
}

#[tokio::test]
async fn arabic_switches_direction() {
    let ctx = TestContext::start().await;

    let resp = ctx
        .post_form("/preferences/language", &[("language", "ar"), ("next", "/products")])
        .await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), Some("/products"));

    let body = ctx.page("/products").await;
    assert!(body.contains(r#"lang="ar""#));
    assert!(body.contains(r#"dir="rtl""#));
}

#[tokio::test]
async fn currency_preference_converts_prices() {
    let ctx = TestContext::start().await;

    let resp = ctx
        .post_form("/preferences/currency", &[("currency", "SAR")])
        .await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), Some("/"));

    let body = ctx.page("/products/p1").await;
    assert!(body.contains("SAR"));
    assert!(!body.contains("$45.00"));
}

#[tokio::test]
async fn bad_preferences_are_rejected() {
    let ctx = TestContext::start().await;

    let resp = ctx
        .post_form("/preferences/language", &[("language", "xx")])
        .await;
    assert_eq!(resp.status(), 400);

    let resp = ctx
        .post_form("/preferences/currency", &[("currency", "BTC")])
        .await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn off_site_next_is_ignored() {
    let ctx = TestContext::start().await;

    let resp = ctx
        .post_form(
            "/preferences/language",
            &[("language", "fr"), ("next", "//evil.example/")],
        )
        .await;
    assert_eq!(location(&resp), Some("/"));
}
