//! Order lifecycle orchestration.
//!
//! Every operation follows the same pipeline: resolve the actor, load the
//! order, check authorization against the concrete order, check the
//! transition table, then persist through the store's compare-and-swap so a
//! concurrent transition surfaces as a conflict instead of a lost update.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::instrument;

use tradelane_catalog::ProductCatalog;
use tradelane_core::{DomainError, DomainResult, OrderId, ProductId, UserId};
use tradelane_directory::{Actor, Role, UserDirectory};
use tradelane_orders::{
    check_transition, FulfillmentDetails, Order, OrderFilter, OrderStatus, PlaceOrder,
    StatusUpdate, VisibilityScope,
};
use tradelane_store::{OrderQuery, OrderStore};

use crate::error::LifecycleError;

/// Input for placing a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub product_id: ProductId,
    pub quantity: i64,
    pub shipping_address: String,
}

/// Input for a generic status transition.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub target: OrderStatus,
    pub fulfillment_details: Option<JsonValue>,
    pub reason: Option<String>,
}

/// The order lifecycle manager.
///
/// Stateless per request; composes the three collaborator ports.
#[derive(Clone)]
pub struct OrderLifecycle {
    directory: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ProductCatalog>,
    store: Arc<dyn OrderStore>,
}

impl OrderLifecycle {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        catalog: Arc<dyn ProductCatalog>,
        store: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            directory,
            catalog,
            store,
        }
    }

    async fn actor(&self, id: UserId) -> Result<Actor, LifecycleError> {
        Ok(self.directory.get_actor(id).await?)
    }

    /// Authorization against a concrete order: sellers must own the
    /// product, buyers must own the order, sub-admins must match the
    /// order's industry, admins pass unconditionally.
    fn authorize(actor: &Actor, order: &Order) -> DomainResult<()> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Seller => {
                if order.seller_id == actor.id {
                    Ok(())
                } else {
                    Err(DomainError::forbidden(
                        "order does not belong to this seller",
                    ))
                }
            }
            Role::Buyer => {
                if order.buyer_id == actor.id {
                    Ok(())
                } else {
                    Err(DomainError::forbidden("order does not belong to this buyer"))
                }
            }
            Role::SubAdmin => match &actor.industry {
                None => Err(DomainError::forbidden(
                    "sub-admin has no industry assignment",
                )),
                Some(industry) if *industry == order.industry => Ok(()),
                Some(_) => Err(DomainError::forbidden(
                    "order is outside the sub-admin's industry",
                )),
            },
        }
    }

    /// Place a new order.
    ///
    /// The product must exist and be approved; a non-approved product is
    /// indistinguishable from a missing one (the catalog filters on
    /// approval), so both fail `NotFound` before any input validation.
    #[instrument(skip(self, request), fields(actor_id = %actor_id))]
    pub async fn create_order(
        &self,
        actor_id: UserId,
        request: CreateOrder,
    ) -> Result<Order, LifecycleError> {
        let actor = self.actor(actor_id).await?;
        if actor.role != Role::Buyer {
            return Err(DomainError::forbidden("only buyers can place orders").into());
        }

        let product = self.catalog.get_product(request.product_id).await?;
        if !product.is_orderable() {
            return Err(DomainError::NotFound.into());
        }

        let order = Order::place(PlaceOrder {
            id: OrderId::new(),
            buyer_id: actor.id,
            product_id: product.id,
            seller_id: product.seller_id,
            industry: product.industry,
            quantity: request.quantity,
            shipping_address: request.shipping_address,
            created_at: Utc::now(),
        })?;

        self.store.insert(&order).await?;
        tracing::info!(order_id = %order.id, "order placed");
        Ok(order)
    }

    /// Request a status transition.
    #[instrument(skip(self, request), fields(actor_id = %actor_id, order_id = %order_id, target = %request.target))]
    pub async fn transition_status(
        &self,
        actor_id: UserId,
        order_id: OrderId,
        request: TransitionRequest,
    ) -> Result<Order, LifecycleError> {
        let actor = self.actor(actor_id).await?;
        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        Self::authorize(&actor, &order)?;
        check_transition(actor.role, order.status, request.target)?;

        let details = request
            .fulfillment_details
            .map(FulfillmentDetails::parse)
            .transpose()?;
        let update = StatusUpdate::for_transition(request.target, details, request.reason);

        let updated = self.store.update_status(order.id, order.status, update).await?;
        tracing::info!(order_id = %updated.id, status = %updated.status, "order transitioned");
        Ok(updated)
    }

    /// Approve a pending order (admin/sub-admin).
    pub async fn approve_order(
        &self,
        actor_id: UserId,
        order_id: OrderId,
        reason: Option<String>,
    ) -> Result<Order, LifecycleError> {
        self.moderate(actor_id, order_id, OrderStatus::Approved, reason)
            .await
    }

    /// Reject a pending order (admin/sub-admin).
    pub async fn reject_order(
        &self,
        actor_id: UserId,
        order_id: OrderId,
        reason: Option<String>,
    ) -> Result<Order, LifecycleError> {
        self.moderate(actor_id, order_id, OrderStatus::Rejected, reason)
            .await
    }

    /// The moderation decision: stricter than the generic transition. The
    /// actor must hold moderation authority and the order must still be
    /// pending, even for admins. The decision reason is recorded either way.
    #[instrument(skip(self, reason), fields(actor_id = %actor_id, order_id = %order_id, target = %target))]
    async fn moderate(
        &self,
        actor_id: UserId,
        order_id: OrderId,
        target: OrderStatus,
        reason: Option<String>,
    ) -> Result<Order, LifecycleError> {
        let actor = self.actor(actor_id).await?;
        if !actor.role.is_moderator() {
            return Err(DomainError::forbidden(
                "only admins and sub-admins can approve or reject orders",
            )
            .into());
        }

        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        Self::authorize(&actor, &order)?;
        if order.status != OrderStatus::PendingApproval {
            return Err(DomainError::transition(order.status, target, actor.role).into());
        }

        let update = StatusUpdate {
            status: target,
            fulfillment_details: None,
            admin_notes: reason,
        };
        let updated = self
            .store
            .update_status(order.id, OrderStatus::PendingApproval, update)
            .await?;
        tracing::info!(order_id = %updated.id, status = %updated.status, "moderation decision recorded");
        Ok(updated)
    }

    /// Seller confirmation: the commitment point of the workflow. Requires
    /// non-empty fulfilment details; admins do not confirm on behalf of
    /// sellers.
    #[instrument(skip(self, fulfillment_details), fields(actor_id = %actor_id, order_id = %order_id))]
    pub async fn confirm_order(
        &self,
        actor_id: UserId,
        order_id: OrderId,
        fulfillment_details: JsonValue,
    ) -> Result<Order, LifecycleError> {
        let actor = self.actor(actor_id).await?;
        if actor.role != Role::Seller {
            return Err(
                DomainError::forbidden("only the product's seller can confirm an order").into(),
            );
        }

        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        Self::authorize(&actor, &order)?;
        if order.status != OrderStatus::Approved {
            return Err(
                DomainError::transition(order.status, OrderStatus::Confirmed, actor.role).into(),
            );
        }

        let details = FulfillmentDetails::parse(fulfillment_details)?;
        let update = StatusUpdate {
            status: OrderStatus::Confirmed,
            fulfillment_details: Some(details),
            admin_notes: None,
        };
        let updated = self
            .store
            .update_status(order.id, OrderStatus::Approved, update)
            .await?;
        tracing::info!(order_id = %updated.id, "order confirmed");
        Ok(updated)
    }

    /// Cancel an order: a fixed-target transition (buyers before dispatch,
    /// admins from anywhere).
    pub async fn cancel_order(
        &self,
        actor_id: UserId,
        order_id: OrderId,
        reason: Option<String>,
    ) -> Result<Order, LifecycleError> {
        self.transition_status(
            actor_id,
            order_id,
            TransitionRequest {
                target: OrderStatus::Cancelled,
                fulfillment_details: None,
                reason,
            },
        )
        .await
    }

    /// List orders visible to the actor, narrowed by the caller's filter.
    #[instrument(skip(self, filter), fields(actor_id = %actor_id))]
    pub async fn find_all(
        &self,
        actor_id: UserId,
        filter: OrderFilter,
    ) -> Result<Vec<Order>, LifecycleError> {
        let actor = self.actor(actor_id).await?;
        let scope = VisibilityScope::for_actor(&actor)?;
        Ok(self.store.list(&OrderQuery::new(scope, filter)).await?)
    }

    /// Look up a single order. Orders outside the actor's scope read as
    /// absent; existence is not disclosed across the visibility boundary.
    #[instrument(skip(self), fields(actor_id = %actor_id, order_id = %order_id))]
    pub async fn find_by_id(
        &self,
        actor_id: UserId,
        order_id: OrderId,
    ) -> Result<Order, LifecycleError> {
        let actor = self.actor(actor_id).await?;
        let scope = VisibilityScope::for_actor(&actor)?;

        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        if !scope.permits(&order) {
            return Err(DomainError::NotFound.into());
        }
        Ok(order)
    }
}
