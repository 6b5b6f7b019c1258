use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use tradelane_core::OrderId;
use tradelane_orders::{Order, OrderStatus, StatusUpdate};

use super::query::OrderQuery;

/// Order store operation error.
///
/// `NotFound`, `AlreadyExists` and `Concurrency` are facts the caller can
/// act on; `Backend` is infrastructure (connectivity, corrupt rows, lock
/// poisoning) and must stay distinguishable from them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("concurrent update lost: expected status {expected}, found {found}")]
    Concurrency {
        expected: OrderStatus,
        found: OrderStatus,
    },

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Durable order storage.
///
/// Implementations must:
/// - keep `update_status` atomic: the status and its side fields persist
///   together or not at all;
/// - make `update_status` a compare-and-swap: the write succeeds only when
///   the stored status still equals `expected`, otherwise
///   `StoreError::Concurrency` reports what was found;
/// - apply the visibility scope of a query before its caller filter.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a newly placed order.
    async fn insert(&self, order: &Order) -> Result<(), StoreError>;

    /// Load an order by id.
    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// List orders matching `query`, newest first.
    async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, StoreError>;

    /// Transition an order's status, conditioned on the status read earlier.
    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        update: StatusUpdate,
    ) -> Result<Order, StoreError>;
}

#[async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        (**self).insert(order).await
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get(id).await
    }

    async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, StoreError> {
        (**self).list(query).await
    }

    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        update: StatusUpdate,
    ) -> Result<Order, StoreError> {
        (**self).update_status(id, expected, update).await
    }
}
