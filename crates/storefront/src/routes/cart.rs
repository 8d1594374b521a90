//! Cart route handlers.
//!
//! The cart lives in the session (see [`Shopper`]). Every mutation is a plain
//! form POST that redirects back, so pages work without JavaScript.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use souq_core::{CartItem, ProductId};
use tracing::instrument;

use super::{load_product, redirect_back};
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::Shopper;
use crate::state::AppState;
use crate::views::{Layout, PageContext};

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub store_id: String,
    pub store_name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl CartLineView {
    fn new(item: &CartItem, layout: &Layout) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            store_id: item.store_id.to_string(),
            store_name: item.store_name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: layout.money(item.price, item.currency),
            line_total: layout.price(item.line_total()),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
    pub next: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

/// Display the cart page.
#[instrument(skip(ctx))]
pub async fn show(ctx: PageContext) -> impl IntoResponse {
    let layout = ctx.layout();
    let cart = &ctx.shopper.cart;
    CartShowTemplate {
        lines: cart
            .items()
            .iter()
            .map(|item| CartLineView::new(item, &layout))
            .collect(),
        subtotal: cart.subtotal(layout.currency).display(),
        item_count: cart.item_count(),
        layout,
    }
}

/// Add a product to the cart, merging with an existing line.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    mut shopper: Shopper,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let id = ProductId::new(form.product_id);
    let product = load_product(&state, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let quantity = form.quantity.unwrap_or(1);
    shopper
        .state
        .cart
        .add(CartItem::from_product(&product, quantity), quantity);
    shopper.save().await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", id.as_str())]),
    );
    Ok(redirect_back(form.next.as_deref(), "/cart").into_response())
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(shopper))]
pub async fn update(
    mut shopper: Shopper,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect, AppError> {
    let id = ProductId::new(form.product_id);
    if shopper.state.cart.set_quantity(&id, form.quantity) {
        shopper.save().await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(shopper))]
pub async fn remove(
    mut shopper: Shopper,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect, AppError> {
    if shopper.state.cart.remove(&ProductId::new(form.product_id)) {
        shopper.save().await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(shopper))]
pub async fn clear(mut shopper: Shopper) -> Result<Redirect, AppError> {
    shopper.state.cart.clear();
    shopper.save().await?;
    add_breadcrumb("cart", "Cleared cart", None);
    Ok(Redirect::to("/cart"))
}
