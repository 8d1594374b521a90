//! Seller dashboard pages and product creation.

use reqwest::multipart::{Form, Part};
use souq_core::dashboard::SellerStats;
use souq_core::{CurrencyCode, Price, mock};
use souq_integration_tests::{TestContext, location};

fn product_form() -> Form {
    Form::new()
        .text("name", "Zellige Coaster Set")
        .text("price", "18.5")
        .text("currency", "USD")
        .text("stock", "40")
        .text("category", "Ceramics")
        .text("description", "Four glazed tiles.")
}

#[tokio::test]
async fn seller_pages_render() {
    let ctx = TestContext::start().await;
    ctx.sign_in_as("seller@souq.test").await;

    for path in [
        "/seller",
        "/seller/products",
        "/seller/products?q=tagine&sort=name",
        "/seller/orders",
        "/seller/orders?status=pending",
    ] {
        ctx.page(path).await;
    }
}

#[tokio::test]
async fn dashboard_revenue_uses_display_currency() {
    let ctx = TestContext::start().await;
    ctx.sign_in_as("seller@souq.test").await;
    ctx.post_form("/preferences/currency", &[("currency", "SAR")])
        .await;

    let stats = SellerStats::compute(
        &mock::seller_orders("s1"),
        &mock::get_products_by_store("s1"),
        CurrencyCode::SAR,
    );
    let body = ctx.page("/seller").await;
    assert!(body.contains(&Price::new(stats.revenue, CurrencyCode::SAR).display()));
}

#[tokio::test]
async fn seller_products_are_own_store_only() {
    let ctx = TestContext::start().await;
    ctx.sign_in_as("seller@souq.test").await;

    let body = ctx.page("/seller/products").await;
    assert!(body.contains("/products/p1"));
}

#[tokio::test]
async fn create_product_redirects_with_name() {
    let ctx = TestContext::start().await;
    ctx.sign_in_as("seller@souq.test").await;

    let resp = ctx
        .client
        .post(ctx.url("/seller/products"))
        .multipart(product_form())
        .send()
        .await
        .unwrap_or_else(|e| panic!("POST failed: {e}"));
    assert_eq!(resp.status(), 303);
    assert_eq!(
        location(&resp),
        Some("/seller/products?created=Zellige+Coaster+Set")
    );

    let body = ctx.page("/seller/products?created=Zellige+Coaster+Set").await;
    assert!(body.contains("Zellige Coaster Set"));
}

#[tokio::test]
async fn create_product_with_photo() {
    let ctx = TestContext::start().await;
    ctx.sign_in_as("seller@souq.test").await;

    let photo = Part::bytes(vec![0x89, b'P', b'N', b'G'])
        .file_name("coasters.png")
        .mime_str("image/png")
        .unwrap_or_else(|e| panic!("bad mime: {e}"));
    let resp = ctx
        .client
        .post(ctx.url("/seller/products"))
        .multipart(product_form().part("image", photo))
        .send()
        .await
        .unwrap_or_else(|e| panic!("POST failed: {e}"));

    assert_eq!(resp.status(), 303);
    assert!(location(&resp).is_some_and(|l| l.contains("created=")));
}

#[tokio::test]
async fn invalid_product_reports_field() {
    let ctx = TestContext::start().await;
    ctx.sign_in_as("seller@souq.test").await;

    let form = Form::new()
        .text("name", "Free Lamp")
        .text("price", "0")
        .text("stock", "1")
        .text("category", "lighting");
    let resp = ctx
        .client
        .post(ctx.url("/seller/products"))
        .multipart(form)
        .send()
        .await
        .unwrap_or_else(|e| panic!("POST failed: {e}"));
    assert_eq!(location(&resp), Some("/seller/products?error=price"));

    let body = ctx.page("/seller/products?error=price").await;
    assert!(body.contains("Enter a price greater than zero."));
}

#[tokio::test]
async fn unsupported_photo_type_is_rejected() {
    let ctx = TestContext::start().await;
    ctx.sign_in_as("seller@souq.test").await;

    let gif = Part::bytes(b"GIF89a".to_vec())
        .file_name("coasters.gif")
        .mime_str("image/gif")
        .unwrap_or_else(|e| panic!("bad mime: {e}"));
    let resp = ctx
        .client
        .post(ctx.url("/seller/products"))
        .multipart(product_form().part("image", gif))
        .send()
        .await
        .unwrap_or_else(|e| panic!("POST failed: {e}"));
    assert_eq!(location(&resp), Some("/seller/products?error=image"));
}
