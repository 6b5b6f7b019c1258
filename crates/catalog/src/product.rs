//! Product facts consumed by the order lifecycle.

use serde::{Deserialize, Serialize};

use tradelane_core::{Industry, ProductId, UserId};

/// Moderation status of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// The slice of a product the lifecycle needs: who sells it, which industry
/// it belongs to, and whether moderation has approved it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub seller_id: UserId,
    pub industry: Industry,
    pub approval: ApprovalStatus,
}

impl ProductSnapshot {
    /// Check whether orders may be placed against this product
    /// (must be approved; pending and rejected products are not orderable).
    pub fn is_orderable(&self) -> bool {
        self.approval == ApprovalStatus::Approved
    }
}
