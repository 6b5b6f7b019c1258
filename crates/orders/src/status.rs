//! Order status workflow.

use serde::{Deserialize, Serialize};

use tradelane_core::{DomainError, DomainResult};

/// Order status lifecycle.
///
/// Workflow order: `PendingApproval → Approved → Confirmed → InProgress →
/// Dispatched → Delivered`, with `Rejected` branching off approval and
/// `Cancelled` branching off the fulfilment stages. `Rejected`, `Cancelled`
/// and `Delivered` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendingApproval,
    Approved,
    Rejected,
    Confirmed,
    InProgress,
    Dispatched,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::PendingApproval,
        OrderStatus::Approved,
        OrderStatus::Rejected,
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Whether the workflow ends here (no further transitions for
    /// non-admin roles; the admin override is total and ignores this).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Rejected | OrderStatus::Delivered | OrderStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingApproval => "pending_approval",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "pending_approval" => Ok(OrderStatus::PendingApproval),
            "approved" => Ok(OrderStatus::Approved),
            "rejected" => Ok(OrderStatus::Rejected),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "in_progress" => Ok(OrderStatus::InProgress),
            "dispatched" => Ok(OrderStatus::Dispatched),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn serde_matches_wire_format() {
        let json = serde_json::to_string(&OrderStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"pending_approval\"");
        let back: OrderStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(back, OrderStatus::InProgress);
    }

    #[test]
    fn exactly_three_terminal_states() {
        let terminal: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(OrderStatus::is_terminal)
            .collect();
        assert_eq!(
            terminal,
            vec![
                OrderStatus::Rejected,
                OrderStatus::Delivered,
                OrderStatus::Cancelled
            ]
        );
    }
}
