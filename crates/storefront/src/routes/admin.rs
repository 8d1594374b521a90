//! Admin dashboard and platform tables.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use souq_core::dashboard::{
    AdminStats, REVENUE_MONTHS, latest_order_date, monthly_revenue, recent_orders,
    status_breakdown,
};
use souq_core::listing::{StoreFilter, filter_orders, matches_query};
use souq_core::{Account, Role, mock};
use tracing::instrument;

use super::seller::StatCard;
use super::{load_all_orders, load_stores, non_empty};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::views::{
    BarView, Choice, Layout, OrderRow, PageContext, StoreView, format_date, parse_status,
    status_choices,
};

const RECENT_ORDERS: usize = 8;

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub layout: Layout,
    pub stats: Vec<StatCard>,
    pub gmv_bars: Vec<BarView>,
    pub status_bars: Vec<BarView>,
    pub recent: Vec<OrderRow>,
}

/// Display the admin dashboard.
#[instrument(skip(state, _admin, ctx))]
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ctx: PageContext,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let stores = load_stores(&state).await;
    let orders = load_all_orders(&state).await;
    let currency = layout.currency;
    let stats = AdminStats::compute(&stores, mock::accounts(), &orders, currency);

    let anchor = latest_order_date(&orders).unwrap_or_else(|| Utc::now().date_naive());
    let gmv = monthly_revenue(&orders, anchor, REVENUE_MONTHS, currency);

    let card = |key: &str, value: String| StatCard {
        label: layout.t(key),
        value,
    };
    let stats = vec![
        card("admin.stores", stats.stores.to_string()),
        card("admin.verified_stores", stats.verified_stores.to_string()),
        card("admin.users", stats.users.to_string()),
        card("admin.orders", stats.orders.to_string()),
        card("admin.gmv", layout.money(stats.gmv, currency)),
    ];

    AdminDashboardTemplate {
        stats,
        gmv_bars: BarView::money(gmv.bars(), currency, &layout),
        status_bars: BarView::statuses(status_breakdown(&orders).bars(), &layout),
        recent: OrderRow::list(&recent_orders(&orders, RECENT_ORDERS), &layout),
        layout,
    }
}

// =============================================================================
// Stores
// =============================================================================

/// Store table query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct AdminStoresQuery {
    pub q: Option<String>,
    pub verified: Option<String>,
}

/// Admin store table template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/stores.html")]
pub struct AdminStoresTemplate {
    pub layout: Layout,
    pub stores: Vec<StoreView>,
    pub query: String,
    pub verified_only: bool,
}

/// Display every store, with search.
#[instrument(skip(state, _admin, ctx))]
pub async fn stores(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ctx: PageContext,
    Query(query): Query<AdminStoresQuery>,
) -> impl IntoResponse {
    let search = non_empty(query.q);
    let verified_only = query.verified.is_some();
    let filter = StoreFilter {
        query: search.clone(),
        country: None,
        verified_only,
    };
    let stores = filter.apply(&load_stores(&state).await);

    AdminStoresTemplate {
        layout: ctx.layout(),
        stores: stores.iter().map(StoreView::from).collect(),
        query: search.unwrap_or_default(),
        verified_only,
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct AdminOrdersQuery {
    pub status: Option<String>,
}

/// Admin order table template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct AdminOrdersTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderRow>,
    pub statuses: Vec<Choice>,
}

/// Display every order on the platform.
#[instrument(skip(state, _admin, ctx))]
pub async fn orders(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ctx: PageContext,
    Query(query): Query<AdminOrdersQuery>,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let status = parse_status(query.status.as_deref());
    let orders = filter_orders(&load_all_orders(&state).await, status);

    AdminOrdersTemplate {
        orders: OrderRow::list(&orders, &layout),
        statuses: status_choices(&layout, status),
        layout,
    }
}

// =============================================================================
// Users
// =============================================================================

/// User table query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct AdminUsersQuery {
    pub q: Option<String>,
    pub role: Option<String>,
}

/// One row of the user table.
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub name: String,
    pub email: String,
    pub role: String,
    pub joined: String,
    pub orders: u32,
    pub active: bool,
}

/// Admin user table template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate {
    pub layout: Layout,
    pub users: Vec<AccountRow>,
    pub query: String,
    pub roles: Vec<Choice>,
}

fn parse_role(value: Option<&str>) -> Option<Role> {
    match value? {
        "buyer" => Some(Role::Buyer),
        "seller" => Some(Role::Seller),
        "admin" => Some(Role::Admin),
        _ => None,
    }
}

/// Accounts matching a name/email search and an optional role.
fn filter_accounts<'a>(
    accounts: &'a [Account],
    query: Option<&str>,
    role: Option<Role>,
) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|a| query.is_none_or(|q| matches_query(q, &[&a.name, a.email.as_str()])))
        .filter(|a| role.is_none_or(|r| a.role == r))
        .collect()
}

/// Display every account, with search and role filter.
#[instrument(skip(_admin, ctx))]
pub async fn users(
    _admin: RequireAdmin,
    ctx: PageContext,
    Query(query): Query<AdminUsersQuery>,
) -> impl IntoResponse {
    let layout = ctx.layout();
    let search = non_empty(query.q);
    let role = parse_role(query.role.as_deref());

    let users = filter_accounts(mock::accounts(), search.as_deref(), role)
        .into_iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            email: a.email.to_string(),
            role: layout.t(&format!("roles.{}", a.role)),
            joined: format_date(a.joined),
            orders: a.orders,
            active: a.active,
        })
        .collect();

    let mut roles = vec![Choice::new("", layout.t("common.all"), role.is_none())];
    roles.extend([Role::Buyer, Role::Seller, Role::Admin].into_iter().map(|r| {
        Choice::new(r.to_string(), layout.t(&format!("roles.{r}")), role == Some(r))
    }));

    AdminUsersTemplate {
        users,
        query: search.unwrap_or_default(),
        roles,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accounts_by_role_and_query() {
        let accounts = mock::accounts();
        let sellers = filter_accounts(accounts, None, Some(Role::Seller));
        assert!(!sellers.is_empty());
        assert!(sellers.iter().all(|a| a.role == Role::Seller));

        let hits = filter_accounts(accounts, Some("NADIA"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(|a| a.role), Some(Role::Admin));
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role(Some("seller")), Some(Role::Seller));
        assert_eq!(parse_role(Some("")), None);
        assert_eq!(parse_role(None), None);
    }
}
