//! Order history reads.

use souq_core::{Order, StoreId, UserId};
use tracing::instrument;

use super::{rows_or_empty, tables};
use crate::backend::{Backend, Direction, Query};

/// Orders placed by `user_id`, newest first. `[]` on failure.
#[instrument(skip(backend))]
pub async fn fetch_user_orders<B: Backend>(backend: &B, user_id: &UserId) -> Vec<Order> {
    let query = Query::from(tables::ORDERS)
        .eq("user_id", user_id)
        .order("date", Direction::Desc);
    rows_or_empty("fetch_user_orders", backend.select(&query).await)
}

/// Orders received by a store, newest first. `[]` on failure.
#[instrument(skip(backend))]
pub async fn fetch_store_orders<B: Backend>(backend: &B, store_id: &StoreId) -> Vec<Order> {
    let query = Query::from(tables::ORDERS)
        .eq("store_id", store_id)
        .order("date", Direction::Desc);
    rows_or_empty("fetch_store_orders", backend.select(&query).await)
}

/// Every order on the platform, newest first. `[]` on failure.
#[instrument(skip(backend))]
pub async fn fetch_all_orders<B: Backend>(backend: &B) -> Vec<Order> {
    let query = Query::from(tables::ORDERS).order("date", Direction::Desc);
    rows_or_empty("fetch_all_orders", backend.select(&query).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    #[tokio::test]
    async fn test_mock_order_reads_are_empty() {
        let backend = MockBackend::new();
        assert!(fetch_user_orders(&backend, &UserId::new("u-buyer")).await.is_empty());
        assert!(fetch_store_orders(&backend, &StoreId::new("s1")).await.is_empty());
        assert!(fetch_all_orders(&backend).await.is_empty());
    }
}
