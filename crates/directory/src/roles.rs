//! Marketplace roles.

use serde::{Deserialize, Serialize};

use tradelane_core::{DomainError, DomainResult};

/// Role of a marketplace actor.
///
/// This is a closed set: the transition table and the visibility rules are
/// keyed by role, so an open string type would silently widen the policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Places orders; owns them from confirmation onwards.
    Buyer,
    /// Lists products; fulfils approved orders for their own products.
    Seller,
    /// Unscoped moderation and full transition override.
    Admin,
    /// Moderation scoped to a single assigned industry.
    SubAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Buyer, Role::Seller, Role::Admin, Role::SubAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
            Role::SubAdmin => "sub_admin",
        }
    }

    /// Whether the role carries moderation authority (order approval).
    pub fn is_moderator(&self) -> bool {
        matches!(self, Role::Admin | Role::SubAdmin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            "sub_admin" => Ok(Role::SubAdmin),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
