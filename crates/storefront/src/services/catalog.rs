//! Catalog reads and seller catalog writes.

use souq_core::{Product, ProductId, Store, StoreId};
use tracing::instrument;

use super::{PRODUCT_IMAGES_BUCKET, row_or_none, rows_or_empty, tables};
use crate::backend::{Backend, Direction, Query, decode_row, to_row};

/// Every product, newest first. `[]` on failure.
#[instrument(skip(backend))]
pub async fn fetch_products<B: Backend>(backend: &B) -> Vec<Product> {
    let query = Query::from(tables::PRODUCTS).order("created_at", Direction::Desc);
    rows_or_empty("fetch_products", backend.select(&query).await)
}

/// One product by id. `None` when missing or on failure.
#[instrument(skip(backend))]
pub async fn fetch_product_by_id<B: Backend>(backend: &B, id: &ProductId) -> Option<Product> {
    let query = Query::from(tables::PRODUCTS).eq("id", id);
    row_or_none("fetch_product_by_id", backend.single(&query).await)
}

/// A store's products, in listing order.
#[instrument(skip(backend))]
pub async fn fetch_products_by_store<B: Backend>(backend: &B, store_id: &StoreId) -> Vec<Product> {
    let query = Query::from(tables::PRODUCTS)
        .eq("store_id", store_id)
        .order("created_at", Direction::Desc);
    rows_or_empty("fetch_products_by_store", backend.select(&query).await)
}

/// Every store, best rated first.
#[instrument(skip(backend))]
pub async fn fetch_stores<B: Backend>(backend: &B) -> Vec<Store> {
    let query = Query::from(tables::STORES).order("rating", Direction::Desc);
    rows_or_empty("fetch_stores", backend.select(&query).await)
}

#[instrument(skip(backend))]
pub async fn fetch_store_by_id<B: Backend>(backend: &B, id: &StoreId) -> Option<Store> {
    let query = Query::from(tables::STORES).eq("id", id);
    row_or_none("fetch_store_by_id", backend.single(&query).await)
}

/// Number of reviews left on a product. `0` on failure.
#[instrument(skip(backend))]
pub async fn fetch_review_count<B: Backend>(backend: &B, product_id: &ProductId) -> u64 {
    let query = Query::from(tables::REVIEWS).eq("product_id", product_id);
    match backend.count(&query).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(operation = "fetch_review_count", error = %e, "Backend query failed");
            0
        }
    }
}

/// Insert a product and return it as stored.
///
/// On failure the submitted product is returned unchanged.
#[instrument(skip(backend, product), fields(name = %product.name))]
pub async fn create_product<B: Backend>(backend: &B, product: Product) -> Product {
    let row = match to_row(&product) {
        Ok(row) => row,
        Err(e) => {
            tracing::error!(operation = "create_product", error = %e, "Failed to encode product");
            return product;
        }
    };

    match backend.insert(tables::PRODUCTS, row).await.map(decode_row::<Product>) {
        Ok(Ok(stored)) => stored,
        Ok(Err(e)) => {
            tracing::error!(operation = "create_product", error = %e, "Failed to decode row");
            product
        }
        Err(e) => {
            tracing::error!(operation = "create_product", error = %e, "Backend insert failed");
            product
        }
    }
}

/// Upload a product photo under the store's folder and return its public URL.
///
/// `None` on failure.
#[instrument(skip(backend, bytes), fields(size = bytes.len()))]
pub async fn upload_product_image<B: Backend>(
    backend: &B,
    store_id: &StoreId,
    file_name: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> Option<String> {
    let path = format!("{store_id}/{file_name}");
    match backend
        .upload(PRODUCT_IMAGES_BUCKET, &path, bytes, content_type)
        .await
    {
        Ok(object) => Some(backend.public_url(PRODUCT_IMAGES_BUCKET, &object.path)),
        Err(e) => {
            tracing::error!(operation = "upload_product_image", error = %e, "Upload failed");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use souq_core::CurrencyCode;

    use super::*;
    use crate::backend::MockBackend;

    fn draft() -> Product {
        Product {
            id: ProductId::new("draft-1"),
            name: "Tea Glass Set".to_string(),
            price: Decimal::new(2200, 2),
            currency: CurrencyCode::USD,
            store_id: StoreId::new("s1"),
            store_name: "Atlas Pottery".to_string(),
            rating: 0.0,
            review_count: 0,
            stock: 10,
            category: "home".to_string(),
            is_new: true,
            is_featured: false,
            old_price: None,
            images: Vec::new(),
            description: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_reads_are_empty_not_errors() {
        let backend = MockBackend::new();
        assert!(fetch_products(&backend).await.is_empty());
        assert!(fetch_stores(&backend).await.is_empty());
        assert!(
            fetch_product_by_id(&backend, &ProductId::new("p1"))
                .await
                .is_none()
        );
        assert!(fetch_store_by_id(&backend, &StoreId::new("s1")).await.is_none());
        assert_eq!(fetch_review_count(&backend, &ProductId::new("p1")).await, 0);
    }

    #[tokio::test]
    async fn test_create_product_echoes_submission() {
        let backend = MockBackend::new();
        let stored = create_product(&backend, draft()).await;
        assert_eq!(stored, draft());
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let backend = MockBackend::new();
        let url = upload_product_image(&backend, &StoreId::new("s1"), "glass.png", vec![0; 4], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "https://mock-storage.souq.local/product-images/s1/glass.png");
    }
}
