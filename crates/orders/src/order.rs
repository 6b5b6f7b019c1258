//! The order entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use tradelane_core::{DomainError, DomainResult, Entity, Industry, OrderId, ProductId, UserId};

use crate::status::OrderStatus;

/// Seller-supplied fulfilment data (carrier, tracking, notes, …).
///
/// Opaque structured JSON, guaranteed non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FulfillmentDetails(JsonValue);

impl FulfillmentDetails {
    /// Accept any non-empty JSON value. `null`, `{}`, `[]` and blank strings
    /// carry no fulfilment information and are rejected.
    pub fn parse(value: JsonValue) -> DomainResult<Self> {
        let empty = match &value {
            JsonValue::Null => true,
            JsonValue::Object(map) => map.is_empty(),
            JsonValue::Array(items) => items.is_empty(),
            JsonValue::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if empty {
            return Err(DomainError::validation(
                "fulfillment details must not be empty",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_json(self) -> JsonValue {
        self.0
    }
}

/// A marketplace order.
///
/// The product's `seller_id` and `industry` are captured at creation time,
/// so ownership and visibility checks never re-consult the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: UserId,
    pub product_id: ProductId,
    pub seller_id: UserId,
    pub industry: Industry,
    pub quantity: i64,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub fulfillment_details: Option<FulfillmentDetails>,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for placing a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub id: OrderId,
    pub buyer_id: UserId,
    pub product_id: ProductId,
    pub seller_id: UserId,
    pub industry: Industry,
    pub quantity: i64,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Place a new order. Orders always enter the workflow at
    /// `PendingApproval` with no fulfilment details and no notes.
    pub fn place(input: PlaceOrder) -> DomainResult<Self> {
        if input.quantity < 1 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if input.shipping_address.trim().is_empty() {
            return Err(DomainError::validation("shipping address must not be empty"));
        }

        Ok(Self {
            id: input.id,
            buyer_id: input.buyer_id,
            product_id: input.product_id,
            seller_id: input.seller_id,
            industry: input.industry,
            quantity: input.quantity,
            shipping_address: input.shipping_address,
            status: OrderStatus::PendingApproval,
            fulfillment_details: None,
            admin_notes: None,
            created_at: input.created_at,
        })
    }
}

/// The write half of a status transition: the target status plus whichever
/// side fields the transition carries. Persisted atomically with the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub fulfillment_details: Option<FulfillmentDetails>,
    pub admin_notes: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: OrderStatus) -> Self {
        Self {
            status,
            fulfillment_details: None,
            admin_notes: None,
        }
    }

    /// Build the update for a transition, applying the side-field policy:
    /// fulfilment details stick only on `Confirmed`/`InProgress`, a reason
    /// is recorded only on `Cancelled`/`Rejected`.
    pub fn for_transition(
        target: OrderStatus,
        fulfillment_details: Option<FulfillmentDetails>,
        reason: Option<String>,
    ) -> Self {
        let fulfillment_details = match target {
            OrderStatus::Confirmed | OrderStatus::InProgress => fulfillment_details,
            _ => None,
        };
        let admin_notes = match target {
            OrderStatus::Cancelled | OrderStatus::Rejected => reason,
            _ => None,
        };
        Self {
            status: target,
            fulfillment_details,
            admin_notes,
        }
    }

    /// Apply to an order. Side fields overwrite only when present; a status
    /// change never clears previously recorded details or notes.
    pub fn apply_to(&self, order: &mut Order) {
        order.status = self.status;
        if let Some(details) = &self.fulfillment_details {
            order.fulfillment_details = Some(details.clone());
        }
        if let Some(notes) = &self.admin_notes {
            order.admin_notes = Some(notes.clone());
        }
    }
}
