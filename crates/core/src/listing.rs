//! Search, filtering, sorting, and pagination over in-memory lists.
//!
//! Catalog and dashboard tables are small enough to filter in memory. Search
//! is a case-insensitive substring match; sorting is stable so equal keys
//! keep their original order.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::{Order, Product, Store};
use crate::types::{CurrencyCode, OrderStatus};

/// Default page size for product grids.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Case-insensitive substring match against any of `fields`.
///
/// An empty (or all-whitespace) query matches everything.
#[must_use]
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Product grid filters, as submitted by the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub in_stock_only: bool,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let query_ok = self.query.as_deref().is_none_or(|q| {
            matches_query(q, &[&product.name, &product.store_name, &product.category])
        });
        let category_ok = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .is_none_or(|c| product.category.eq_ignore_ascii_case(c));
        query_ok && category_ok && (!self.in_stock_only || product.in_stock())
    }

    /// Products passing the filter, in input order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

/// Store directory filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilter {
    pub query: Option<String>,
    pub country: Option<String>,
    pub verified_only: bool,
}

impl StoreFilter {
    #[must_use]
    pub fn matches(&self, store: &Store) -> bool {
        let description = store.description.as_deref().unwrap_or_default();
        let query_ok = self
            .query
            .as_deref()
            .is_none_or(|q| matches_query(q, &[&store.name, description]));
        let country_ok = self
            .country
            .as_deref()
            .filter(|c| !c.is_empty())
            .is_none_or(|c| store.country.eq_ignore_ascii_case(c));
        query_ok && country_ok && (!self.verified_only || store.verified)
    }

    #[must_use]
    pub fn apply(&self, stores: &[Store]) -> Vec<Store> {
        stores.iter().filter(|s| self.matches(s)).cloned().collect()
    }
}

/// Orders whose status equals `status`, or all orders when `None`.
#[must_use]
pub fn filter_orders(orders: &[Order], status: Option<OrderStatus>) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| status.is_none_or(|s| o.status == s))
        .cloned()
        .collect()
}

/// Products flagged featured, at most `limit`, in catalog order.
#[must_use]
pub fn featured_products(products: &[Product], limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_featured)
        .take(limit)
        .cloned()
        .collect()
}

/// Products flagged new, at most `limit`, in catalog order.
#[must_use]
pub fn new_arrivals(products: &[Product], limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_new)
        .take(limit)
        .cloned()
        .collect()
}

/// Other products in the same category as `product`, at most `limit`.
#[must_use]
pub fn related_products(products: &[Product], product: &Product, limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.id != product.id && p.category.eq_ignore_ascii_case(&product.category))
        .take(limit)
        .cloned()
        .collect()
}

/// Featured stores, at most `limit`.
#[must_use]
pub fn featured_stores(stores: &[Store], limit: usize) -> Vec<Store> {
    stores
        .iter()
        .filter(|s| s.featured)
        .take(limit)
        .cloned()
        .collect()
}

/// Distinct product categories, sorted.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut names: Vec<&str> = products.iter().map(|p| p.category.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Distinct store countries, sorted.
#[must_use]
pub fn countries(stores: &[Store]) -> Vec<&str> {
    let mut names: Vec<&str> = stores.iter().map(|s| s.country.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Product sort orders offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep the catalog's own order.
    #[default]
    Featured,
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
    Name,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Featured,
        Self::Newest,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Rating,
        Self::Name,
    ];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Rating => "rating",
            Self::Name => "name",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown sort: {s}"))
    }
}

/// Sort products in place. The sort is stable.
///
/// Prices in different currencies are compared in USD.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    let usd = |p: &Product| p.price().convert_to(CurrencyCode::USD).amount;
    match key {
        SortKey::Featured => {}
        SortKey::Newest => products.sort_by(|a, b| match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::PriceAsc => products.sort_by_key(|p| usd(p)),
        SortKey::PriceDesc => products.sort_by(|a, b| usd(b).cmp(&usd(a))),
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Name => products.sort_by_key(|p| p.name.to_lowercase()),
    }
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number, clamped into range.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    /// Always at least 1, even for an empty list.
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice out page `page` (1-based) of `items`.
///
/// Out-of-range pages are clamped to the first or last page; a zero
/// `per_page` is treated as one.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let items = items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
