//! Resolved actor identity.

use serde::{Deserialize, Serialize};

use tradelane_core::{Industry, UserId};

use crate::roles::Role;

/// A fully resolved marketplace actor, as reported by the user directory.
///
/// `industry` is the actor's category affiliation: the assigned industry for
/// a sub-admin, the trading industry for a seller. Buyers and admins carry
/// none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
    pub industry: Option<Industry>,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            industry: None,
        }
    }

    pub fn with_industry(id: UserId, role: Role, industry: Industry) -> Self {
        Self {
            id,
            role,
            industry: Some(industry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_actor_has_no_industry() {
        let actor = Actor::new(UserId::new(), Role::Buyer);
        assert!(actor.industry.is_none());
    }

    #[test]
    fn scoped_actor_keeps_industry() {
        let actor =
            Actor::with_industry(UserId::new(), Role::SubAdmin, Industry::new("electronics"));
        assert_eq!(actor.industry.unwrap().as_str(), "electronics");
    }
}
