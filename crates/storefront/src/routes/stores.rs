//! Store directory and store page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use souq_core::StoreId;
use souq_core::listing::{self, StoreFilter};
use tracing::instrument;

use super::{load_store, load_store_products, load_stores, non_empty};
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;
use crate::views::{Choice, Layout, PageContext, ProductView, StoreView};

/// Store directory query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    pub q: Option<String>,
    pub country: Option<String>,
    pub verified: Option<String>,
}

/// Store directory template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/index.html")]
pub struct StoresIndexTemplate {
    pub layout: Layout,
    pub stores: Vec<StoreView>,
    pub query: String,
    pub countries: Vec<Choice>,
    pub verified_only: bool,
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/show.html")]
pub struct StoreShowTemplate {
    pub layout: Layout,
    pub store: StoreView,
    pub products: Vec<ProductView>,
}

/// Display the store directory.
#[instrument(skip(state, ctx))]
pub async fn index(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(query): Query<DirectoryQuery>,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let all = load_stores(&state).await;

    let search = non_empty(query.q);
    let country = non_empty(query.country);
    let verified_only = query.verified.is_some();
    let filter = StoreFilter {
        query: search.clone(),
        country: country.clone(),
        verified_only,
    };

    let names = listing::countries(&all);
    let selected = country.as_deref().unwrap_or_default();
    let mut countries = vec![Choice::new(
        "",
        layout.t("store.country_all"),
        selected.is_empty(),
    )];
    countries.extend(
        names
            .into_iter()
            .map(|c| Choice::new(c, c, c.eq_ignore_ascii_case(selected))),
    );

    StoresIndexTemplate {
        stores: filter.apply(&all).iter().map(StoreView::from).collect(),
        query: search.unwrap_or_default(),
        countries,
        verified_only,
        layout,
    }
}

/// Display one store with its products, in the store's own order.
#[instrument(skip(state, ctx))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = StoreId::new(id);
    let store = load_store(&state, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("store {id}")))?;
    let products = load_store_products(&state, &id).await;

    let layout = ctx.layout();
    Ok(StoreShowTemplate {
        store: StoreView::from(&store),
        products: ProductView::list(&products, &layout, &ctx.shopper),
        layout,
    })
}
