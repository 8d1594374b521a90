//! Seller dashboard, product management, and store orders.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use souq_core::dashboard::{
    REVENUE_MONTHS, SellerStats, latest_order_date, monthly_revenue, recent_orders,
    status_breakdown,
};
use souq_core::listing::{
    DEFAULT_PER_PAGE, SortKey, filter_orders, matches_query, paginate, sort_products,
};
use souq_core::{CurrencyCode, Product, ProductId, StoreId};
use tracing::instrument;
use uuid::Uuid;

use super::{load_store, load_store_orders, load_store_products, non_empty};
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireSeller;
use crate::services::catalog;
use crate::state::AppState;
use crate::views::{
    BarView, Choice, Layout, OrderRow, PageContext, Pagination, ProductView, parse_status,
    query_string, status_choices,
};

const RECENT_ORDERS: usize = 5;

/// Image types accepted for product photos, with their file extensions.
const IMAGE_TYPES: [(&str, &str); 3] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

// =============================================================================
// Dashboard
// =============================================================================

/// A stat card.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}

/// Seller dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/dashboard.html")]
pub struct SellerDashboardTemplate {
    pub layout: Layout,
    pub store_name: String,
    pub stats: Vec<StatCard>,
    pub revenue_bars: Vec<BarView>,
    pub status_bars: Vec<BarView>,
    pub recent: Vec<OrderRow>,
}

/// Display the seller dashboard.
#[instrument(skip(state, seller, ctx))]
pub async fn dashboard(
    State(state): State<AppState>,
    seller: RequireSeller,
    ctx: PageContext,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let store_id = seller.store_id;
    let store_name = load_store(&state, &store_id)
        .await
        .map_or_else(|| store_id.to_string(), |s| s.name);
    let orders = load_store_orders(&state, &store_id).await;
    let products = load_store_products(&state, &store_id).await;

    // Totals are reported in the shopper's display currency
    let currency = layout.currency;
    let stats = SellerStats::compute(&orders, &products, currency);
    // Chart ends at the latest order so seed data stays on screen
    let anchor = latest_order_date(&orders).unwrap_or_else(|| Utc::now().date_naive());
    let revenue = monthly_revenue(&orders, anchor, REVENUE_MONTHS, currency);

    SellerDashboardTemplate {
        store_name,
        stats: vec![
            StatCard {
                label: layout.t("seller.revenue"),
                value: layout.money(stats.revenue, currency),
            },
            StatCard {
                label: layout.t("seller.orders"),
                value: stats.orders.to_string(),
            },
            StatCard {
                label: layout.t("seller.pending"),
                value: stats.pending.to_string(),
            },
            StatCard {
                label: layout.t("seller.products"),
                value: stats.products.to_string(),
            },
            StatCard {
                label: layout.t("seller.rating"),
                value: format!("{:.1}", stats.average_rating),
            },
        ],
        revenue_bars: BarView::money(revenue.bars(), currency, &layout),
        status_bars: BarView::statuses(status_breakdown(&orders).bars(), &layout),
        recent: OrderRow::list(&recent_orders(&orders, RECENT_ORDERS), &layout),
        layout,
    }
}

// =============================================================================
// Products
// =============================================================================

/// Product table query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SellerProductsQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub created: Option<String>,
    pub error: Option<String>,
}

/// Seller product table template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/products.html")]
pub struct SellerProductsTemplate {
    pub layout: Layout,
    pub products: Vec<ProductView>,
    pub query: String,
    pub sorts: Vec<Choice>,
    pub pagination: Pagination,
    pub currencies: Vec<Choice>,
    pub created: Option<String>,
    pub error: Option<String>,
}

/// Display the seller's product table.
#[instrument(skip(state, seller, ctx))]
pub async fn products(
    State(state): State<AppState>,
    seller: RequireSeller,
    ctx: PageContext,
    Query(query): Query<SellerProductsQuery>,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let all = load_store_products(&state, &seller.store_id).await;

    let search = non_empty(query.q);
    let sort = query
        .sort
        .as_deref()
        .and_then(|s| s.parse::<SortKey>().ok())
        .unwrap_or_default();

    let mut rows: Vec<Product> = all
        .into_iter()
        .filter(|p| {
            search
                .as_deref()
                .is_none_or(|q| matches_query(q, &[&p.name, &p.category]))
        })
        .collect();
    sort_products(&mut rows, sort);
    let page = paginate(&rows, query.page.unwrap_or(1), DEFAULT_PER_PAGE);

    let base_query = query_string(&[
        ("q", search.as_deref().unwrap_or_default()),
        ("sort", if sort == SortKey::default() { "" } else { sort.as_str() }),
    ]);
    let default_currency = state.config().default_currency;

    SellerProductsTemplate {
        products: ProductView::list(&page.items, &layout, &ctx.shopper),
        query: search.unwrap_or_default(),
        sorts: SortKey::ALL
            .into_iter()
            .map(|k| {
                let key = format!("product.sort_{}", k.as_str().replace('-', "_"));
                Choice::new(k.as_str(), layout.t(&key), k == sort)
            })
            .collect(),
        pagination: Pagination::new(&page, "/seller/products", &base_query),
        currencies: CurrencyCode::ALL
            .into_iter()
            .map(|c| Choice::new(c.code(), c.code(), c == default_currency))
            .collect(),
        created: query.created,
        error: query
            .error
            .as_deref()
            .map(|code| layout.t(&format!("seller.error_{code}"))),
        layout,
    }
}

/// A product as submitted by the seller form, before it has an id or store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub currency: CurrencyCode,
    pub stock: u32,
    pub category: String,
    pub description: Option<String>,
}

/// Validate the text fields of the product form, returning an error code.
fn parse_draft(
    fields: &HashMap<String, String>,
    default_currency: CurrencyCode,
) -> Result<ProductDraft, &'static str> {
    let field = |name: &str| fields.get(name).map(|v| v.trim()).unwrap_or_default();

    let name = field("name");
    if name.is_empty() {
        return Err("name");
    }
    let price = field("price")
        .parse::<Decimal>()
        .ok()
        .filter(|p| *p > Decimal::ZERO)
        .ok_or("price")?;
    let stock = field("stock").parse::<u32>().map_err(|_| "stock")?;
    let category = field("category").to_lowercase();
    if category.is_empty() {
        return Err("category");
    }
    let currency = match field("currency") {
        "" => default_currency,
        code => code.parse().map_err(|_| "currency")?,
    };
    let description = Some(field("description").to_string()).filter(|d| !d.is_empty());

    Ok(ProductDraft {
        name: name.to_string(),
        price: price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        currency,
        stock,
        category,
        description,
    })
}

/// An uploaded product photo.
struct ImageUpload {
    bytes: Vec<u8>,
    content_type: String,
    extension: &'static str,
}

/// Create a product from the seller form (multipart, with optional photo).
#[instrument(skip(state, seller, multipart), fields(store_id = %seller.store_id))]
pub async fn create_product(
    State(state): State<AppState>,
    seller: RequireSeller,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            if bytes.is_empty() {
                continue;
            }
            let Some((_, extension)) = IMAGE_TYPES.iter().find(|(t, _)| *t == content_type) else {
                return Ok(Redirect::to("/seller/products?error=image"));
            };
            image = Some(ImageUpload {
                bytes: bytes.to_vec(),
                content_type,
                extension: *extension,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            fields.insert(name, text);
        }
    }

    let draft = match parse_draft(&fields, state.config().default_currency) {
        Ok(draft) => draft,
        Err(code) => return Ok(Redirect::to(&format!("/seller/products?error={code}"))),
    };

    let store_name = load_store(&state, &seller.store_id)
        .await
        .map_or_else(|| seller.store_id.to_string(), |s| s.name);
    let id = ProductId::new(Uuid::new_v4().to_string());

    let mut images = Vec::new();
    if let Some(upload) = image {
        let file_name = format!("{id}.{}", upload.extension);
        match catalog::upload_product_image(
            state.backend(),
            &seller.store_id,
            &file_name,
            upload.bytes,
            &upload.content_type,
        )
        .await
        {
            Some(url) => images.push(url),
            None => tracing::warn!(product_id = %id, "Saving product without its photo"),
        }
    }

    let product = new_product(id, seller.store_id, store_name, draft, images);
    let stored = catalog::create_product(state.backend(), product).await;

    tracing::info!(product_id = %stored.id, user_id = %seller.user.id, "Product created");
    add_breadcrumb(
        "seller",
        "Created product",
        Some(&[("product_id", stored.id.as_str())]),
    );
    let created = query_string(&[("created", &stored.name)]);
    Ok(Redirect::to(&format!("/seller/products?{created}")))
}

fn new_product(
    id: ProductId,
    store_id: StoreId,
    store_name: String,
    draft: ProductDraft,
    images: Vec<String>,
) -> Product {
    Product {
        id,
        name: draft.name,
        price: draft.price,
        currency: draft.currency,
        store_id,
        store_name,
        rating: 0.0,
        review_count: 0,
        stock: draft.stock,
        category: draft.category,
        is_new: true,
        is_featured: false,
        old_price: None,
        images,
        description: draft.description,
        created_at: Some(Utc::now().date_naive()),
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Seller order table template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/orders.html")]
pub struct SellerOrdersTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderRow>,
    pub statuses: Vec<Choice>,
}

/// Display orders received by the seller's store.
#[instrument(skip(state, seller, ctx))]
pub async fn orders(
    State(state): State<AppState>,
    seller: RequireSeller,
    ctx: PageContext,
    Query(query): Query<StatusQuery>,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let status = parse_status(query.status.as_deref());
    let orders = filter_orders(&load_store_orders(&state, &seller.store_id).await, status);

    SellerOrdersTemplate {
        orders: OrderRow::list(&orders, &layout),
        statuses: status_choices(&layout, status),
        layout,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_draft() {
        let draft = parse_draft(
            &form(&[
                ("name", " Tea Glass Set "),
                ("price", "22.505"),
                ("stock", "10"),
                ("category", "Home"),
                ("description", ""),
            ]),
            CurrencyCode::MAD,
        )
        .unwrap();
        assert_eq!(draft.name, "Tea Glass Set");
        assert_eq!(draft.price, Decimal::new(2251, 2));
        assert_eq!(draft.currency, CurrencyCode::MAD);
        assert_eq!(draft.category, "home");
        assert_eq!(draft.description, None);
    }

    #[test]
    fn test_parse_draft_errors() {
        let base = [("name", "Rug"), ("price", "10"), ("stock", "1"), ("category", "home")];
        assert!(parse_draft(&form(&base), CurrencyCode::USD).is_ok());

        let mut bad = form(&base);
        bad.insert("price".to_string(), "-3".to_string());
        assert_eq!(parse_draft(&bad, CurrencyCode::USD), Err("price"));

        let mut bad = form(&base);
        bad.insert("stock".to_string(), "lots".to_string());
        assert_eq!(parse_draft(&bad, CurrencyCode::USD), Err("stock"));

        let mut bad = form(&base);
        bad.insert("currency".to_string(), "XYZ".to_string());
        assert_eq!(parse_draft(&bad, CurrencyCode::USD), Err("currency"));

        assert_eq!(parse_draft(&form(&[]), CurrencyCode::USD), Err("name"));
    }

    #[test]
    fn test_new_product_is_listed_today() {
        let draft = parse_draft(
            &form(&[("name", "Rug"), ("price", "10"), ("stock", "0"), ("category", "home")]),
            CurrencyCode::USD,
        )
        .unwrap();
        let product = new_product(
            ProductId::new("x"),
            StoreId::new("s1"),
            "Atlas Pottery".to_string(),
            draft,
            Vec::new(),
        );
        assert!(product.is_new);
        assert!(!product.in_stock());
        assert_eq!(product.created_at, Some(Utc::now().date_naive()));
    }
}
