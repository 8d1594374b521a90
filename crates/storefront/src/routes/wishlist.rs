//! Wishlist route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use souq_core::{ProductId, WishlistItem};
use tracing::instrument;

use super::{load_product, redirect_back};
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::Shopper;
use crate::state::AppState;
use crate::views::{Layout, PageContext};

/// Saved item display data for templates.
#[derive(Debug, Clone)]
pub struct WishlistItemView {
    pub id: String,
    pub name: String,
    pub store_id: String,
    pub store_name: String,
    pub image: Option<String>,
    pub price: String,
}

/// Wishlist form data.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: String,
    pub next: Option<String>,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistTemplate {
    pub layout: Layout,
    pub items: Vec<WishlistItemView>,
}

/// Display the wishlist.
#[instrument(skip(ctx))]
pub async fn show(ctx: PageContext) -> WishlistTemplate {
    let layout = ctx.layout();
    let items = ctx
        .shopper
        .wishlist
        .items()
        .iter()
        .map(|item| WishlistItemView {
            id: item.id.to_string(),
            name: item.name.clone(),
            store_id: item.store_id.to_string(),
            store_name: item.store_name.clone(),
            image: item.image.clone(),
            price: layout.money(item.price, item.currency),
        })
        .collect();
    WishlistTemplate { layout, items }
}

/// Save a product, or unsave it if already saved.
#[instrument(skip(state, shopper))]
pub async fn toggle(
    State(state): State<AppState>,
    mut shopper: Shopper,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect, AppError> {
    let id = ProductId::new(form.product_id);
    let product = load_product(&state, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let saved = shopper.state.wishlist.toggle(WishlistItem::from(&product));
    shopper.save().await?;

    add_breadcrumb(
        "wishlist",
        if saved { "Saved item" } else { "Unsaved item" },
        Some(&[("product_id", id.as_str())]),
    );
    Ok(redirect_back(form.next.as_deref(), "/wishlist"))
}

/// Remove a saved product.
#[instrument(skip(shopper))]
pub async fn remove(
    mut shopper: Shopper,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect, AppError> {
    if shopper
        .state
        .wishlist
        .remove(&ProductId::new(form.product_id))
        .is_some()
    {
        shopper.save().await?;
    }
    Ok(redirect_back(form.next.as_deref(), "/wishlist"))
}

/// Move a saved product into the cart with quantity one.
#[instrument(skip(shopper))]
pub async fn move_to_cart(
    mut shopper: Shopper,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect, AppError> {
    if shopper.state.move_to_cart(&ProductId::new(form.product_id)) {
        shopper.save().await?;
    }
    Ok(redirect_back(form.next.as_deref(), "/wishlist"))
}
