use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use tradelane_core::OrderId;
use tradelane_orders::{Order, OrderStatus, StatusUpdate};

use super::query::OrderQuery;
use super::r#trait::{OrderStore, StoreError};

/// In-memory order store.
///
/// Intended for tests/dev. Not optimized for performance. The
/// compare-and-swap runs under the write lock, which serializes
/// transitions exactly like the conditional UPDATE does in Postgres.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        if orders.contains_key(&order.id) {
            return Err(StoreError::AlreadyExists);
        }
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(orders.get(&id).cloned())
    }

    async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| query.matches(order))
            .cloned()
            .collect();

        // Newest first; ids are time-ordered (UUIDv7) and break ties.
        matching.sort_by(|a, b| {
            (b.created_at, b.id.as_uuid()).cmp(&(a.created_at, a.id.as_uuid()))
        });
        Ok(matching)
    }

    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        update: StatusUpdate,
    ) -> Result<Order, StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let order = orders.get_mut(&id).ok_or(StoreError::NotFound)?;

        if order.status != expected {
            return Err(StoreError::Concurrency {
                expected,
                found: order.status,
            });
        }

        update.apply_to(order);
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use tradelane_core::{Industry, ProductId, UserId};
    use tradelane_orders::{FulfillmentDetails, OrderFilter, PlaceOrder, VisibilityScope};

    fn sample_order() -> Order {
        Order::place(PlaceOrder {
            id: OrderId::new(),
            buyer_id: UserId::new(),
            product_id: ProductId::new(),
            seller_id: UserId::new(),
            industry: Industry::new("electronics"),
            quantity: 2,
            shipping_address: "5 Quay Lane".to_string(),
            created_at: Utc::now(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = InMemoryOrderStore::new();
        let order = sample_order();
        store.insert(&order).await.unwrap();

        let found = store.get(order.id).await.unwrap().unwrap();
        assert_eq!(found, order);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryOrderStore::new();
        let order = sample_order();
        store.insert(&order).await.unwrap();

        let err = store.insert(&order).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));
    }

    #[tokio::test]
    async fn update_missing_order_is_not_found() {
        let store = InMemoryOrderStore::new();
        let err = store
            .update_status(
                OrderId::new(),
                OrderStatus::PendingApproval,
                StatusUpdate::new(OrderStatus::Approved),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn cas_persists_status_and_side_fields_together() {
        let store = InMemoryOrderStore::new();
        let mut order = sample_order();
        order.status = OrderStatus::Approved;
        store.insert(&order).await.unwrap();

        let details = FulfillmentDetails::parse(json!({"carrier": "DHL"})).unwrap();
        let updated = store
            .update_status(
                order.id,
                OrderStatus::Approved,
                StatusUpdate {
                    status: OrderStatus::Confirmed,
                    fulfillment_details: Some(details.clone()),
                    admin_notes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Confirmed);
        assert_eq!(updated.fulfillment_details, Some(details));
    }

    #[tokio::test]
    async fn stale_expectation_loses_the_race() {
        let store = InMemoryOrderStore::new();
        let mut order = sample_order();
        order.status = OrderStatus::Dispatched;
        store.insert(&order).await.unwrap();

        // Both writers read the order at `dispatched`. The first transition
        // wins; the second must fail instead of silently overwriting.
        store
            .update_status(
                order.id,
                OrderStatus::Dispatched,
                StatusUpdate::new(OrderStatus::Delivered),
            )
            .await
            .unwrap();

        let err = store
            .update_status(
                order.id,
                OrderStatus::Dispatched,
                StatusUpdate::new(OrderStatus::Cancelled),
            )
            .await
            .unwrap_err();

        match err {
            StoreError::Concurrency { expected, found } => {
                assert_eq!(expected, OrderStatus::Dispatched);
                assert_eq!(found, OrderStatus::Delivered);
            }
            other => panic!("expected Concurrency, got {other:?}"),
        }

        let stored = store.get(order.id).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn list_applies_scope_before_filter() {
        let store = InMemoryOrderStore::new();
        let buyer = UserId::new();

        let mut pending = sample_order();
        pending.buyer_id = buyer;
        let mut confirmed = sample_order();
        confirmed.buyer_id = buyer;
        confirmed.status = OrderStatus::Confirmed;

        store.insert(&pending).await.unwrap();
        store.insert(&confirmed).await.unwrap();

        let scope = VisibilityScope {
            buyer_id: Some(buyer),
            seller_id: None,
            industry: None,
            statuses: Some(tradelane_orders::BUYER_WINDOW),
        };

        // A filter naming the hidden status cannot widen the scope.
        let query = OrderQuery::new(
            scope.clone(),
            OrderFilter {
                status: Some(OrderStatus::PendingApproval),
                ..OrderFilter::default()
            },
        );
        assert!(store.list(&query).await.unwrap().is_empty());

        let all_visible = store.list(&OrderQuery::scoped(scope)).await.unwrap();
        assert_eq!(all_visible.len(), 1);
        assert_eq!(all_visible[0].id, confirmed.id);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = InMemoryOrderStore::new();
        let older = sample_order();
        let newer = sample_order();
        store.insert(&older).await.unwrap();
        store.insert(&newer).await.unwrap();

        let listed = store
            .list(&OrderQuery::scoped(VisibilityScope::unrestricted()))
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
    }
}
