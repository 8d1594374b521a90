//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Product listing (?q, ?category, ?sort, ?page)
//! GET  /products/{id}          - Product detail
//! GET  /stores                 - Store directory (?q, ?country, ?verified)
//! GET  /stores/{id}            - Store page
//!
//! # Cart and wishlist (session)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Set line quantity (0 removes)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty cart
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/toggle        - Save or unsave a product
//! POST /wishlist/remove        - Remove saved product
//! POST /wishlist/move-to-cart  - Move saved product into the cart
//!
//! # Preferences
//! POST /preferences/language   - Set interface language
//! POST /preferences/currency   - Set display currency
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Buyer (requires auth)
//! GET  /orders                 - Order history
//! GET  /orders/{id}            - Order tracking
//! GET  /messages               - Conversations
//! GET  /messages/{id}          - Conversation thread
//! POST /messages/{id}          - Send message
//!
//! # Seller (requires seller role)
//! GET  /seller                 - Dashboard
//! GET  /seller/products        - Product table
//! POST /seller/products        - Create product
//! GET  /seller/orders          - Store orders (?status)
//!
//! # Admin (requires admin role)
//! GET  /admin                  - Dashboard
//! GET  /admin/stores           - Store table
//! GET  /admin/orders           - All orders (?status)
//! GET  /admin/users            - User table
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod messages;
pub mod orders;
pub mod preferences;
pub mod products;
pub mod seller;
pub mod stores;
pub mod wishlist;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use souq_core::{Order, Product, ProductId, Store, StoreId, UserId, mock};

use crate::middleware::auth::safe_next;
use crate::services::{catalog, orders as order_service};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stores::index))
        .route("/{id}", get(stores::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
        .route("/move-to-cart", post(wishlist::move_to_cart))
}

/// Create the preference routes router.
pub fn preference_routes() -> Router<AppState> {
    Router::new()
        .route("/language", post(preferences::set_language))
        .route("/currency", post(preferences::set_currency))
}

/// Create the buyer order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the messaging routes router.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(messages::index))
        .route("/{id}", get(messages::show).post(messages::send))
}

/// Create the seller routes router.
pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(seller::dashboard))
        .route("/products", get(seller::products).post(seller::create_product))
        .route("/orders", get(seller::orders))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/stores", get(admin::stores))
        .route("/orders", get(admin::orders))
        .route("/users", get(admin::users))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/stores", store_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/preferences", preference_routes())
        .nest("/auth", auth_routes())
        .nest("/orders", order_routes())
        .nest("/messages", message_routes())
        .nest("/seller", seller_routes())
        .nest("/admin", admin_routes())
}

// =============================================================================
// Page Data
// =============================================================================
//
// Backend reads never fail; they come back empty. An empty result means
// either "no backend" or "backend unavailable", and in both cases pages show
// the bundled seed data instead of a blank screen.

fn or_seed<T>(fetched: Vec<T>, seed: impl FnOnce() -> Vec<T>) -> Vec<T> {
    if fetched.is_empty() { seed() } else { fetched }
}

pub(crate) async fn load_products(state: &AppState) -> Vec<Product> {
    or_seed(catalog::fetch_products(state.backend()).await, || {
        mock::all_products().to_vec()
    })
}

pub(crate) async fn load_product(state: &AppState, id: &ProductId) -> Option<Product> {
    match catalog::fetch_product_by_id(state.backend(), id).await {
        Some(product) => Some(product),
        None => mock::get_product_by_id(id.as_str()).cloned(),
    }
}

pub(crate) async fn load_store_products(state: &AppState, store_id: &StoreId) -> Vec<Product> {
    or_seed(
        catalog::fetch_products_by_store(state.backend(), store_id).await,
        || mock::get_products_by_store(store_id.as_str()),
    )
}

pub(crate) async fn load_stores(state: &AppState) -> Vec<Store> {
    or_seed(catalog::fetch_stores(state.backend()).await, || {
        mock::all_stores().to_vec()
    })
}

pub(crate) async fn load_store(state: &AppState, id: &StoreId) -> Option<Store> {
    match catalog::fetch_store_by_id(state.backend(), id).await {
        Some(store) => Some(store),
        None => mock::get_store_by_id(id.as_str()).cloned(),
    }
}

pub(crate) async fn load_user_orders(state: &AppState, user_id: &UserId) -> Vec<Order> {
    or_seed(
        order_service::fetch_user_orders(state.backend(), user_id).await,
        || mock::buyer_orders(user_id.as_str()),
    )
}

pub(crate) async fn load_store_orders(state: &AppState, store_id: &StoreId) -> Vec<Order> {
    or_seed(
        order_service::fetch_store_orders(state.backend(), store_id).await,
        || mock::seller_orders(store_id.as_str()),
    )
}

pub(crate) async fn load_all_orders(state: &AppState) -> Vec<Order> {
    or_seed(order_service::fetch_all_orders(state.backend()).await, || {
        mock::all_orders().to_vec()
    })
}

/// Redirect to a posted-back `next` path, or `fallback` when it is missing
/// or points off-site.
pub(crate) fn redirect_back(next: Option<&str>, fallback: &str) -> Redirect {
    Redirect::to(safe_next(next).unwrap_or(fallback))
}

/// Treat blank query-string values as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
