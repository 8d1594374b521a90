//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use souq_core::listing::{
    self, DEFAULT_PER_PAGE, ProductFilter, SortKey, paginate, sort_products,
};
use souq_core::ProductId;
use tracing::instrument;

use super::{load_product, load_products, non_empty};
use crate::error::AppError;
use crate::filters;
use crate::services::catalog;
use crate::state::AppState;
use crate::views::{Choice, Layout, PageContext, Pagination, ProductView, query_string};

const RELATED_PRODUCTS: usize = 4;

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    #[serde(default)]
    pub in_stock: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub products: Vec<ProductView>,
    pub total: usize,
    pub query: String,
    pub categories: Vec<Choice>,
    pub sorts: Vec<Choice>,
    pub in_stock_only: bool,
    pub pagination: Pagination,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: ProductView,
    pub review_count: u64,
    pub related: Vec<ProductView>,
}

/// Translation key for a sort option's label.
fn sort_label_key(key: SortKey) -> String {
    format!("product.sort_{}", key.as_str().replace('-', "_"))
}

/// Display the product listing page.
#[instrument(skip(state, ctx))]
pub async fn index(
    State(state): State<AppState>,
    ctx: PageContext,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let all = load_products(&state).await;

    let search = non_empty(query.q);
    let category = non_empty(query.category);
    let sort = query
        .sort
        .as_deref()
        .and_then(|s| s.parse::<SortKey>().ok())
        .unwrap_or_default();
    let in_stock_only = query.in_stock.is_some();

    let filter = ProductFilter {
        query: search.clone(),
        category: category.clone(),
        in_stock_only,
    };
    let mut hits = filter.apply(&all);
    sort_products(&mut hits, sort);
    let page = paginate(&hits, query.page.unwrap_or(1), DEFAULT_PER_PAGE);

    let category_names = listing::categories(&all);
    let selected_category = category.as_deref().unwrap_or_default();
    let mut categories = vec![Choice::new(
        "",
        layout.t("product.category_all"),
        selected_category.is_empty(),
    )];
    categories.extend(
        category_names
            .into_iter()
            .map(|c| Choice::new(c, c, c.eq_ignore_ascii_case(selected_category))),
    );

    let sorts = SortKey::ALL
        .into_iter()
        .map(|k| Choice::new(k.as_str(), layout.t(&sort_label_key(k)), k == sort))
        .collect();

    let base_query = query_string(&[
        ("q", search.as_deref().unwrap_or_default()),
        ("category", selected_category),
        ("sort", if sort == SortKey::default() { "" } else { sort.as_str() }),
        ("in_stock", if in_stock_only { "1" } else { "" }),
    ]);

    ProductsIndexTemplate {
        products: ProductView::list(&page.items, &layout, &ctx.shopper),
        total: page.total_items,
        query: search.unwrap_or_default(),
        categories,
        sorts,
        in_stock_only,
        pagination: Pagination::new(&page, "/products", &base_query),
        layout,
    }
}

/// Display the product detail page.
#[instrument(skip(state, ctx))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = ProductId::new(id);
    let product = load_product(&state, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    // The review table may be empty (or absent) even when the product
    // carries an aggregate count
    let review_count = match catalog::fetch_review_count(state.backend(), &id).await {
        0 => u64::from(product.review_count),
        n => n,
    };

    let all = load_products(&state).await;
    let related = listing::related_products(&all, &product, RELATED_PRODUCTS);

    let layout = ctx.layout();
    Ok(ProductShowTemplate {
        product: ProductView::new(&product, &layout, &ctx.shopper),
        review_count,
        related: ProductView::list(&related, &layout, &ctx.shopper),
        layout,
    })
}
