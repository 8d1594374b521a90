//! Catalog listings.
//!
//! Reads go through the storefront's data-access helpers, so a backend
//! failure prints the bundled seed catalog instead of an error, the same way
//! the pages behave.

use souq_core::listing::{ProductFilter, SortKey, StoreFilter, sort_products};
use souq_core::{Product, Store, StoreId, mock};
use souq_storefront::backend::BackendClient;
use souq_storefront::services::catalog;

use super::CliError;

/// Parsed `products` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    pub filter: ProductFilter,
    pub store: Option<StoreId>,
    pub sort: SortKey,
    pub limit: usize,
}

impl ProductListing {
    /// Validate the raw command-line values.
    pub fn new(
        query: Option<String>,
        category: Option<String>,
        store: Option<String>,
        sort: &str,
        in_stock_only: bool,
        limit: usize,
    ) -> Result<Self, CliError> {
        let sort = sort
            .parse::<SortKey>()
            .map_err(|_| CliError::InvalidArgument {
                field: "sort",
                message: format!("unknown sort order {sort:?}"),
            })?;
        Ok(Self {
            filter: ProductFilter {
                query,
                category,
                in_stock_only,
            },
            store: store.map(StoreId::new),
            sort,
            limit,
        })
    }

    /// Filter, sort, and truncate a product list.
    #[must_use]
    pub fn select(&self, products: &[Product]) -> Vec<Product> {
        let mut rows = self.filter.apply(products);
        sort_products(&mut rows, self.sort);
        rows.truncate(self.limit);
        rows
    }
}

/// Parsed `stores` arguments.
pub type StoreListing = StoreFilter;

fn product_line(product: &Product) -> String {
    let stock = if product.in_stock() {
        product.stock.to_string()
    } else {
        "sold out".to_string()
    };
    format!(
        "{:<6} {:<36} {:>14}  {:.1}★  {:<12} {:<10} {}",
        product.id.as_str(),
        product.name,
        product.price().display(),
        product.rating,
        product.category,
        stock,
        product.store_name,
    )
}

fn store_line(store: &Store) -> String {
    format!(
        "{:<6} {:<28} {:<16} {:.1}★  {:>4} products{}",
        store.id.as_str(),
        store.name,
        store.country,
        store.rating,
        store.product_count,
        if store.verified { "  ✓ verified" } else { "" },
    )
}

/// Print matching products.
#[allow(clippy::print_stdout)]
pub async fn products(backend: &BackendClient, listing: &ProductListing) {
    let fetched = match &listing.store {
        Some(store_id) => catalog::fetch_products_by_store(backend, store_id).await,
        None => catalog::fetch_products(backend).await,
    };
    let all = if fetched.is_empty() {
        tracing::debug!("No products from backend, using seed catalog");
        match &listing.store {
            Some(store_id) => mock::get_products_by_store(store_id.as_str()),
            None => mock::all_products().to_vec(),
        }
    } else {
        fetched
    };

    let rows = listing.select(&all);
    for product in &rows {
        println!("{}", product_line(product));
    }
    tracing::info!(shown = rows.len(), total = all.len(), "Listed products");
}

/// Print matching stores, best rated first.
#[allow(clippy::print_stdout)]
pub async fn stores(backend: &BackendClient, listing: &StoreListing) {
    let fetched = catalog::fetch_stores(backend).await;
    let all = if fetched.is_empty() {
        mock::all_stores().to_vec()
    } else {
        fetched
    };

    let rows = listing.apply(&all);
    for store in &rows {
        println!("{}", store_line(store));
    }
    tracing::info!(shown = rows.len(), total = all.len(), "Listed stores");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_rejects_unknown_sort() {
        let err = ProductListing::new(None, None, None, "cheapest", false, 10).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { field: "sort", .. }));
    }

    #[test]
    fn test_select_filters_sorts_and_limits() {
        let listing =
            ProductListing::new(None, Some("ceramics".into()), None, "price-asc", false, 2)
                .unwrap();
        let rows = listing.select(mock::all_products());

        assert!(rows.len() <= 2);
        assert!(rows.iter().all(|p| p.category == "ceramics"));
        assert!(rows.windows(2).all(|w| match w {
            [a, b] => a.price <= b.price,
            _ => true,
        }));
    }

    #[test]
    fn test_store_listing_verified_only() {
        let listing = StoreListing {
            verified_only: true,
            ..StoreListing::default()
        };
        assert!(listing.apply(mock::all_stores()).iter().all(|s| s.verified));
    }

    #[test]
    fn test_product_line_marks_sold_out() {
        let sold_out = mock::all_products().iter().find(|p| p.stock == 0);
        if let Some(product) = sold_out {
            assert!(product_line(product).contains("sold out"));
        }
        let first = mock::all_products().first().unwrap();
        assert!(product_line(first).starts_with(first.id.as_str()));
    }
}
