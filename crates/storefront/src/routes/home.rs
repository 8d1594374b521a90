//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use souq_core::listing;
use tracing::instrument;

use super::{load_products, load_stores};
use crate::filters;
use crate::state::AppState;
use crate::views::{Layout, PageContext, ProductView, StoreView};

const FEATURED_PRODUCTS: usize = 4;
const NEW_ARRIVALS: usize = 4;
const FEATURED_STORES: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub featured: Vec<ProductView>,
    pub new_arrivals: Vec<ProductView>,
    pub stores: Vec<StoreView>,
    pub categories: Vec<String>,
}

/// Display the home page.
#[instrument(skip(state, ctx))]
pub async fn home(State(state): State<AppState>, ctx: PageContext) -> impl IntoResponse {
    let layout = ctx.layout();
    let products = load_products(&state).await;
    let stores = load_stores(&state).await;

    let featured = listing::featured_products(&products, FEATURED_PRODUCTS);
    let new_arrivals = listing::new_arrivals(&products, NEW_ARRIVALS);
    let featured_stores: Vec<StoreView> = listing::featured_stores(&stores, FEATURED_STORES)
        .iter()
        .map(StoreView::from)
        .collect();
    let categories: Vec<String> = listing::categories(&products)
        .into_iter()
        .map(String::from)
        .collect();

    HomeTemplate {
        featured: ProductView::list(&featured, &layout, &ctx.shopper),
        new_arrivals: ProductView::list(&new_arrivals, &layout, &ctx.shopper),
        stores: featured_stores,
        categories,
        layout,
    }
}
