//! Template view models.
//!
//! Templates receive preformatted strings: prices are converted into the
//! shopper's currency and labels are translated before rendering.

use axum::extract::{FromRef, FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use souq_core::dashboard::Bar;
use souq_core::listing::Page;
use souq_core::{
    CurrencyCode, Language, Order, OrderStatus, Price, Product, Role, ShopperState, Store,
    Translator,
};

use crate::error::AppError;
use crate::middleware::{OptionalAuth, Shopper};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Everything a full page needs besides its own content.
///
/// Extracted once per GET handler; read-only.
pub struct PageContext {
    pub shopper: ShopperState,
    pub user: Option<CurrentUser>,
    pub path: String,
}

impl<S> FromRequestParts<S> for PageContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or(&parts.uri, |uri| &uri.0)
            .path_and_query()
            .map_or_else(|| "/".to_string(), ToString::to_string);
        let Ok(OptionalAuth(user)) = OptionalAuth::from_request_parts(parts, state).await;
        let shopper = Shopper::from_request_parts(parts, state).await?;
        Ok(Self {
            shopper: shopper.state,
            user,
            path,
        })
    }
}

impl PageContext {
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(&self.shopper, self.user.as_ref(), &self.path)
    }
}

/// An option in a picker (language, currency, sort, status).
#[derive(Debug, Clone)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Signed-in user as shown in the header.
#[derive(Debug, Clone)]
pub struct UserView {
    pub name: String,
    pub is_seller: bool,
    pub is_admin: bool,
}

/// Shared page chrome: language, direction, currency, counts, navigation.
#[derive(Debug, Clone)]
pub struct Layout {
    pub i18n: Translator,
    pub lang: &'static str,
    pub dir: &'static str,
    pub currency: CurrencyCode,
    pub languages: Vec<Choice>,
    pub currencies: Vec<Choice>,
    pub cart_count: u32,
    pub wishlist_count: usize,
    pub user: Option<UserView>,
    /// Current path and query, posted back by the preference forms.
    pub path: String,
}

impl Layout {
    #[must_use]
    pub fn new(shopper: &ShopperState, user: Option<&CurrentUser>, path: &str) -> Self {
        let language = shopper.language;
        Self {
            i18n: Translator::new(language),
            lang: language.code(),
            dir: language.direction().as_str(),
            currency: shopper.currency,
            languages: Language::ALL
                .into_iter()
                .map(|l| Choice::new(l.code(), l.native_name(), l == language))
                .collect(),
            currencies: CurrencyCode::ALL
                .into_iter()
                .map(|c| Choice::new(c.code(), c.code(), c == shopper.currency))
                .collect(),
            cart_count: shopper.cart.item_count(),
            wishlist_count: shopper.wishlist.len(),
            user: user.map(|u| UserView {
                name: u.name.clone(),
                is_seller: u.role == Role::Seller,
                is_admin: u.role == Role::Admin,
            }),
            path: path.to_string(),
        }
    }

    /// Translate `key` into the page language.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key).to_string()
    }

    /// Format an amount in the shopper's currency.
    #[must_use]
    pub fn money(&self, amount: Decimal, currency: CurrencyCode) -> String {
        self.price(Price::new(amount, currency))
    }

    #[must_use]
    pub fn price(&self, price: Price) -> String {
        price.convert_to(self.currency).display()
    }

    #[must_use]
    pub fn status_label(&self, status: OrderStatus) -> String {
        self.t(&format!("status.{}", status.as_str()))
    }
}

/// CSS class for an order status badge.
#[must_use]
pub const fn status_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge badge-pending",
        OrderStatus::Processing => "badge badge-processing",
        OrderStatus::Shipped => "badge badge-shipped",
        OrderStatus::Delivered => "badge badge-delivered",
        OrderStatus::Cancelled => "badge badge-cancelled",
    }
}

/// Status filter options, led by "All".
#[must_use]
pub fn status_choices(layout: &Layout, selected: Option<OrderStatus>) -> Vec<Choice> {
    let mut choices = vec![Choice::new("", layout.t("common.all"), selected.is_none())];
    choices.extend(OrderStatus::ALL.into_iter().map(|s| {
        Choice::new(s.as_str(), layout.status_label(s), selected == Some(s))
    }));
    choices
}

/// Parse an optional `?status=` value; unknown values mean "all".
#[must_use]
pub fn parse_status(value: Option<&str>) -> Option<OrderStatus> {
    value.and_then(|s| s.parse().ok())
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Product card or detail data.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub store_id: String,
    pub store_name: String,
    pub category: String,
    pub price: String,
    pub old_price: Option<String>,
    pub discount: Option<u32>,
    pub rating: String,
    pub review_count: u32,
    pub image: Option<String>,
    pub description: String,
    pub stock: u32,
    pub in_stock: bool,
    pub low_stock: bool,
    pub is_new: bool,
    pub saved: bool,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, layout: &Layout, shopper: &ShopperState) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            store_id: product.store_id.to_string(),
            store_name: product.store_name.clone(),
            category: product.category.clone(),
            price: layout.price(product.price()),
            old_price: product.old_price().map(|p| layout.price(p)),
            discount: product.discount_percent(),
            rating: format!("{:.1}", product.rating),
            review_count: product.review_count,
            image: product.primary_image().map(String::from),
            description: product.description.clone().unwrap_or_default(),
            stock: product.stock,
            in_stock: product.in_stock(),
            low_stock: product.is_low_stock(),
            is_new: product.is_new,
            saved: shopper.wishlist.contains(&product.id),
        }
    }

    #[must_use]
    pub fn list(products: &[Product], layout: &Layout, shopper: &ShopperState) -> Vec<Self> {
        products
            .iter()
            .map(|p| Self::new(p, layout, shopper))
            .collect()
    }
}

/// Store card or header data.
#[derive(Debug, Clone)]
pub struct StoreView {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub logo: Option<String>,
    pub country: String,
    pub rating: String,
    pub review_count: u32,
    pub product_count: u32,
    pub verified: bool,
    pub description: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<&Store> for StoreView {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id.to_string(),
            name: store.name.clone(),
            initials: store.initials(),
            logo: store.logo.clone(),
            country: store.country.clone(),
            rating: format!("{:.1}", store.rating),
            review_count: store.review_count,
            product_count: store.product_count,
            verified: store.verified,
            description: store.description.clone().unwrap_or_default(),
            email: store.contact.email.clone(),
            phone: store.contact.phone.clone(),
            address: store.contact.address.clone(),
        }
    }
}

/// One row of an order table.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: String,
    pub date: String,
    pub status_label: String,
    pub status_class: &'static str,
    pub total: String,
    pub item_count: u32,
    pub store_name: String,
    pub customer_name: String,
}

impl OrderRow {
    #[must_use]
    pub fn new(order: &Order, layout: &Layout) -> Self {
        Self {
            id: order.id.to_string(),
            date: format_date(order.date),
            status_label: layout.status_label(order.status),
            status_class: status_class(order.status),
            total: layout.price(order.total_price()),
            item_count: order.item_count(),
            store_name: order.store_name.clone().unwrap_or_default(),
            customer_name: order.customer_name.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn list(orders: &[Order], layout: &Layout) -> Vec<Self> {
        orders.iter().map(|o| Self::new(o, layout)).collect()
    }
}

/// A chart bar with its value already formatted.
#[derive(Debug, Clone)]
pub struct BarView {
    pub label: String,
    pub value: String,
    pub percent: u8,
}

impl BarView {
    /// Bars whose values are amounts in `currency`.
    #[must_use]
    pub fn money(bars: Vec<Bar>, currency: CurrencyCode, layout: &Layout) -> Vec<Self> {
        bars.into_iter()
            .map(|bar| Self {
                value: layout.money(bar.value, currency),
                label: bar.label,
                percent: bar.percent,
            })
            .collect()
    }

    /// Bars whose values are counts and whose labels are order statuses.
    #[must_use]
    pub fn statuses(bars: Vec<Bar>, layout: &Layout) -> Vec<Self> {
        bars.into_iter()
            .map(|bar| Self {
                value: bar.value.to_string(),
                label: bar
                    .label
                    .parse::<OrderStatus>()
                    .map_or(bar.label, |s| layout.status_label(s)),
                percent: bar.percent,
            })
            .collect()
    }
}

/// Previous/next links for a paginated list.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl Pagination {
    /// Build links by appending `page=N` to `base_query` (already encoded).
    #[must_use]
    pub fn new<T>(page: &Page<T>, path: &str, base_query: &str) -> Self {
        let link = |n: usize| {
            if base_query.is_empty() {
                format!("{path}?page={n}")
            } else {
                format!("{path}?{base_query}&page={n}")
            }
        };
        Self {
            page: page.page,
            total_pages: page.total_pages,
            prev_url: page.has_previous().then(|| link(page.page - 1)),
            next_url: page.has_next().then(|| link(page.page + 1)),
        }
    }
}

/// Encode `key=value` pairs, skipping empty values.
#[must_use]
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if !value.is_empty() {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use souq_core::listing::paginate;
    use souq_core::mock;

    use super::*;

    fn layout(language: Language, currency: CurrencyCode) -> Layout {
        Layout::new(&ShopperState::new(language, currency), None, "/")
    }

    #[test]
    fn test_layout_direction_follows_language() {
        let ar = layout(Language::Ar, CurrencyCode::USD);
        assert_eq!(ar.dir, "rtl");
        assert_eq!(ar.lang, "ar");
        assert!(ar.languages.iter().any(|c| c.value == "ar" && c.selected));
        assert_eq!(layout(Language::Fr, CurrencyCode::USD).dir, "ltr");
    }

    #[test]
    fn test_money_converts_to_shopper_currency() {
        let sar = layout(Language::En, CurrencyCode::SAR);
        assert_eq!(sar.money(Decimal::new(1000, 2), CurrencyCode::USD), "37.50 SAR");
        let usd = layout(Language::En, CurrencyCode::USD);
        assert_eq!(usd.money(Decimal::new(1999, 2), CurrencyCode::USD), "$19.99");
    }

    #[test]
    fn test_status_label_is_translated() {
        let fr = layout(Language::Fr, CurrencyCode::EUR);
        assert_eq!(fr.status_label(OrderStatus::Shipped), "Expédiée");
        assert_eq!(status_class(OrderStatus::Cancelled), "badge badge-cancelled");
    }

    #[test]
    fn test_product_view_marks_saved_items() {
        let product = mock::get_product_by_id("p1").unwrap();
        let mut shopper = ShopperState::default();
        shopper.wishlist.toggle(product.into());
        let view = ProductView::new(product, &layout(Language::En, CurrencyCode::USD), &shopper);
        assert!(view.saved);
        assert_eq!(view.store_id, "s1");
    }

    #[test]
    fn test_pagination_links_keep_query() {
        let items: Vec<u32> = (0..30).collect();
        let page = paginate(&items, 2, 12);
        let query = query_string(&[("q", "tea glass"), ("category", "")]);
        let pagination = Pagination::new(&page, "/products", &query);
        assert_eq!(
            pagination.prev_url.as_deref(),
            Some("/products?q=tea+glass&page=1")
        );
        assert_eq!(
            pagination.next_url.as_deref(),
            Some("/products?q=tea+glass&page=3")
        );
    }
}
