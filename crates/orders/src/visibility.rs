//! Role-scoped visibility policy.
//!
//! Encodes the staged-disclosure rules: buyers do not see an order until a
//! seller has committed to it, sellers do not see orders still pending
//! moderation. The scope derived here is applied by the store *before* any
//! caller-supplied filter.

use serde::{Deserialize, Serialize};

use tradelane_core::{DomainError, DomainResult, Industry, UserId};
use tradelane_directory::{Actor, Role};

use crate::order::Order;
use crate::status::OrderStatus;

/// Statuses a buyer may observe: confirmation onwards.
pub const BUYER_WINDOW: &[OrderStatus] = &[
    OrderStatus::Confirmed,
    OrderStatus::InProgress,
    OrderStatus::Dispatched,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// Statuses a seller may observe: approval onwards.
pub const SELLER_WINDOW: &[OrderStatus] = &[
    OrderStatus::Approved,
    OrderStatus::Confirmed,
    OrderStatus::InProgress,
    OrderStatus::Dispatched,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// The visibility constraint derived from an actor's role.
///
/// `None` in a field means "no constraint on that axis".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityScope {
    pub buyer_id: Option<UserId>,
    pub seller_id: Option<UserId>,
    pub industry: Option<Industry>,
    pub statuses: Option<&'static [OrderStatus]>,
}

impl VisibilityScope {
    /// The admin scope: everything.
    pub fn unrestricted() -> Self {
        Self {
            buyer_id: None,
            seller_id: None,
            industry: None,
            statuses: None,
        }
    }

    /// Derive the scope for an actor.
    ///
    /// Fails `Forbidden` for a sub-admin without an industry assignment;
    /// an unscoped sub-admin would otherwise see every order.
    pub fn for_actor(actor: &Actor) -> DomainResult<Self> {
        match actor.role {
            Role::Admin => Ok(Self::unrestricted()),
            Role::Buyer => Ok(Self {
                buyer_id: Some(actor.id),
                seller_id: None,
                industry: None,
                statuses: Some(BUYER_WINDOW),
            }),
            Role::Seller => Ok(Self {
                buyer_id: None,
                seller_id: Some(actor.id),
                industry: None,
                statuses: Some(SELLER_WINDOW),
            }),
            Role::SubAdmin => {
                let industry = actor.industry.clone().ok_or_else(|| {
                    DomainError::forbidden("sub-admin has no industry assignment")
                })?;
                Ok(Self {
                    buyer_id: None,
                    seller_id: None,
                    industry: Some(industry),
                    statuses: None,
                })
            }
        }
    }

    /// Whether this scope permits observing `order`.
    pub fn permits(&self, order: &Order) -> bool {
        if let Some(buyer_id) = self.buyer_id {
            if order.buyer_id != buyer_id {
                return false;
            }
        }
        if let Some(seller_id) = self.seller_id {
            if order.seller_id != seller_id {
                return false;
            }
        }
        if let Some(industry) = &self.industry {
            if &order.industry != industry {
                return false;
            }
        }
        if let Some(statuses) = self.statuses {
            if !statuses.contains(&order.status) {
                return false;
            }
        }
        true
    }
}

/// Caller-supplied list filter, applied after the visibility scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub seller_id: Option<UserId>,
    pub buyer_id: Option<UserId>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some(seller_id) = self.seller_id {
            if order.seller_id != seller_id {
                return false;
            }
        }
        if let Some(buyer_id) = self.buyer_id {
            if order.buyer_id != buyer_id {
                return false;
            }
        }
        true
    }
}
