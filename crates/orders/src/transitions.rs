//! Role-keyed transition table.
//!
//! The transition policy is data, not control flow: each non-admin role has
//! a static allow-list of `(current, target)` edges, and admin is a total
//! override. Authorization against a *specific* order (ownership, industry
//! scope) is a separate concern handled by the lifecycle manager; this
//! module only answers "may this role ever request this edge".

use tradelane_core::{DomainError, DomainResult};
use tradelane_directory::Role;

use crate::status::OrderStatus;

type Edge = (OrderStatus, OrderStatus);

/// Sub-admins action the initial moderation decision only.
const SUB_ADMIN_EDGES: &[Edge] = &[
    (OrderStatus::PendingApproval, OrderStatus::Approved),
    (OrderStatus::PendingApproval, OrderStatus::Rejected),
];

/// Sellers walk an approved order through fulfilment.
const SELLER_EDGES: &[Edge] = &[
    (OrderStatus::Approved, OrderStatus::Confirmed),
    (OrderStatus::Confirmed, OrderStatus::InProgress),
    (OrderStatus::InProgress, OrderStatus::Dispatched),
];

/// Buyers acknowledge delivery, and may cancel before dispatch.
const BUYER_EDGES: &[Edge] = &[
    (OrderStatus::Dispatched, OrderStatus::Delivered),
    (OrderStatus::Confirmed, OrderStatus::Cancelled),
    (OrderStatus::InProgress, OrderStatus::Cancelled),
];

/// The allow-list for a role; `None` means unrestricted (admin override).
pub fn allowed_edges(role: Role) -> Option<&'static [Edge]> {
    match role {
        Role::Admin => None,
        Role::SubAdmin => Some(SUB_ADMIN_EDGES),
        Role::Seller => Some(SELLER_EDGES),
        Role::Buyer => Some(BUYER_EDGES),
    }
}

/// Whether `role` may request `current → target`.
pub fn is_allowed(role: Role, current: OrderStatus, target: OrderStatus) -> bool {
    match allowed_edges(role) {
        None => true,
        Some(edges) => edges.contains(&(current, target)),
    }
}

/// Table lookup with the typed rejection the API surfaces.
pub fn check_transition(
    role: Role,
    current: OrderStatus,
    target: OrderStatus,
) -> DomainResult<()> {
    if is_allowed(role, current, target) {
        Ok(())
    } else {
        Err(DomainError::transition(current, target, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradelane_directory::Role;

    #[test]
    fn admin_override_is_total() {
        for current in OrderStatus::ALL {
            for target in OrderStatus::ALL {
                assert!(is_allowed(Role::Admin, current, target));
            }
        }
    }

    #[test]
    fn check_matches_the_table_exactly() {
        // Exhaustive sweep: check_transition succeeds iff the edge is listed
        // (or the role is admin).
        for role in Role::ALL {
            for current in OrderStatus::ALL {
                for target in OrderStatus::ALL {
                    let listed = match allowed_edges(role) {
                        None => true,
                        Some(edges) => edges.contains(&(current, target)),
                    };
                    assert_eq!(
                        check_transition(role, current, target).is_ok(),
                        listed,
                        "role={role} {current}->{target}"
                    );
                }
            }
        }
    }

    #[test]
    fn rejection_names_current_target_and_role() {
        let err = check_transition(
            Role::Seller,
            OrderStatus::PendingApproval,
            OrderStatus::Confirmed,
        )
        .unwrap_err();
        match err {
            DomainError::InvalidTransition {
                current,
                requested,
                role,
            } => {
                assert_eq!(current, "pending_approval");
                assert_eq!(requested, "confirmed");
                assert_eq!(role, "seller");
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn seller_fulfilment_path_is_allowed() {
        assert!(is_allowed(
            Role::Seller,
            OrderStatus::Approved,
            OrderStatus::Confirmed
        ));
        assert!(is_allowed(
            Role::Seller,
            OrderStatus::Confirmed,
            OrderStatus::InProgress
        ));
        assert!(is_allowed(
            Role::Seller,
            OrderStatus::InProgress,
            OrderStatus::Dispatched
        ));
    }

    #[test]
    fn buyer_cannot_cancel_after_dispatch() {
        assert!(!is_allowed(
            Role::Buyer,
            OrderStatus::Dispatched,
            OrderStatus::Cancelled
        ));
    }

    #[test]
    fn sub_admin_only_moderates_pending_orders() {
        assert!(is_allowed(
            Role::SubAdmin,
            OrderStatus::PendingApproval,
            OrderStatus::Approved
        ));
        assert!(!is_allowed(
            Role::SubAdmin,
            OrderStatus::Approved,
            OrderStatus::Confirmed
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use proptest::sample::select;

        static NON_ADMIN_ROLES: [Role; 3] = [Role::Buyer, Role::Seller, Role::SubAdmin];

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            select(&OrderStatus::ALL[..])
        }

        fn non_admin_role() -> impl Strategy<Value = Role> {
            select(&NON_ADMIN_ROLES[..])
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: terminal states are inescapable for non-admin roles.
            #[test]
            fn non_admin_cannot_leave_terminal_states(
                role in non_admin_role(),
                current in any_status().prop_filter("terminal", |s| s.is_terminal()),
                target in any_status(),
            ) {
                prop_assert!(check_transition(role, current, target).is_err());
            }

            /// Property: every sub-admin edge starts at pending approval.
            #[test]
            fn sub_admin_edges_start_at_pending(
                current in any_status(),
                target in any_status(),
            ) {
                if is_allowed(Role::SubAdmin, current, target) {
                    prop_assert_eq!(current, OrderStatus::PendingApproval);
                }
            }
        }
    }
}
