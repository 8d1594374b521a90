//! Buyer order history and tracking.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use souq_core::listing::filter_orders;
use souq_core::{Order, OrderStatus};
use tracing::instrument;

use super::load_user_orders;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;
use crate::views::{
    Choice, Layout, OrderRow, PageContext, format_date, parse_status, status_choices,
};

/// Order list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// A point on the tracking timeline.
#[derive(Debug, Clone)]
pub struct StepView {
    pub label: String,
    pub done: bool,
    pub current: bool,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

#[derive(Debug, Clone)]
pub struct ShippingView {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub method: String,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentView {
    pub method: String,
    pub last4: Option<String>,
    pub paid: bool,
}

/// Everything the tracking page shows about one order.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub row: OrderRow,
    pub store_id: Option<String>,
    pub cancelled: bool,
    pub steps: Vec<StepView>,
    pub items: Vec<OrderItemView>,
    pub subtotal: String,
    pub shipping_cost: String,
    pub shipping: Option<ShippingView>,
    pub payment: Option<PaymentView>,
}

/// Timeline for an order: every non-cancelled status in lifecycle order.
fn timeline(status: OrderStatus, layout: &Layout) -> Vec<StepView> {
    let reached = status.step();
    OrderStatus::ALL
        .into_iter()
        .filter_map(|s| s.step().map(|step| (s, step)))
        .map(|(s, step)| StepView {
            label: layout.status_label(s),
            done: reached.is_some_and(|r| step <= r),
            current: reached == Some(step),
        })
        .collect()
}

impl OrderDetailView {
    fn new(order: &Order, layout: &Layout) -> Self {
        Self {
            row: OrderRow::new(order, layout),
            store_id: order.store_id.as_ref().map(ToString::to_string),
            cancelled: order.status == OrderStatus::Cancelled,
            steps: timeline(order.status, layout),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    id: item.id.to_string(),
                    name: item.name.clone(),
                    image: item.image.clone(),
                    quantity: item.quantity,
                    price: layout.money(item.price, order.currency),
                    line_total: layout.money(item.line_total(), order.currency),
                })
                .collect(),
            subtotal: layout.money(order.subtotal(), order.currency),
            shipping_cost: layout.money(order.shipping_cost(), order.currency),
            shipping: order.shipping.as_ref().map(|s| ShippingView {
                name: s.name.clone(),
                address: s.address.clone(),
                city: s.city.clone(),
                country: s.country.clone(),
                method: s.method.clone(),
                tracking_number: s.tracking_number.clone(),
                estimated_delivery: s.estimated_delivery.map(format_date),
            }),
            payment: order.payment.as_ref().map(|p| PaymentView {
                method: p.method.clone(),
                last4: p.last4.clone(),
                paid: p.paid,
            }),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderRow>,
    pub statuses: Vec<Choice>,
}

/// Order tracking template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub layout: Layout,
    pub order: OrderDetailView,
}

/// Display the signed-in user's orders.
#[instrument(skip(state, auth, ctx))]
pub async fn index(
    State(state): State<AppState>,
    auth: RequireAuth,
    ctx: PageContext,
    Query(query): Query<OrdersQuery>,
) -> impl IntoResponse {
    let RequireAuth(user) = auth;
    let layout = ctx.layout();
    let status = parse_status(query.status.as_deref());
    let orders = filter_orders(&load_user_orders(&state, &user.id).await, status);

    OrdersIndexTemplate {
        orders: OrderRow::list(&orders, &layout),
        statuses: status_choices(&layout, status),
        layout,
    }
}

/// Display one of the signed-in user's orders.
///
/// Orders belonging to someone else are reported as missing.
#[instrument(skip(state, auth, ctx))]
pub async fn show(
    State(state): State<AppState>,
    auth: RequireAuth,
    ctx: PageContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let RequireAuth(user) = auth;
    let order = load_user_orders(&state, &user.id)
        .await
        .into_iter()
        .find(|o| o.id == id.as_str())
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let layout = ctx.layout();
    Ok(OrderShowTemplate {
        order: OrderDetailView::new(&order, &layout),
        layout,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use souq_core::{CurrencyCode, Language, ShopperState, mock};

    use super::*;

    fn layout() -> Layout {
        Layout::new(&ShopperState::new(Language::En, CurrencyCode::USD), None, "/orders")
    }

    #[test]
    fn test_timeline_marks_progress() {
        let steps = timeline(OrderStatus::Shipped, &layout());
        assert_eq!(steps.len(), 4);
        let done: Vec<bool> = steps.iter().map(|s| s.done).collect();
        assert_eq!(done, [true, true, true, false]);
        assert_eq!(steps.iter().filter(|s| s.current).count(), 1);
    }

    #[test]
    fn test_cancelled_timeline_has_nothing_done() {
        let steps = timeline(OrderStatus::Cancelled, &layout());
        assert!(steps.iter().all(|s| !s.done && !s.current));
    }

    #[test]
    fn test_detail_totals() {
        let order = mock::all_orders().iter().find(|o| o.id == "o-1002").unwrap();
        let detail = OrderDetailView::new(order, &layout());
        assert!(!detail.cancelled);
        assert!(detail.shipping.is_some());
        assert_eq!(detail.steps.iter().filter(|s| s.done).count(), 3);
    }
}
