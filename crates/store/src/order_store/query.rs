use tradelane_orders::{Order, OrderFilter, VisibilityScope};

/// A list query: the actor's visibility scope plus the caller's filter.
///
/// The scope is not optional: every list goes through one, and it is
/// applied before the filter so a filter can never widen what a role may
/// see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub scope: VisibilityScope,
    pub filter: OrderFilter,
}

impl OrderQuery {
    pub fn new(scope: VisibilityScope, filter: OrderFilter) -> Self {
        Self { scope, filter }
    }

    /// A scope with no caller filter.
    pub fn scoped(scope: VisibilityScope) -> Self {
        Self {
            scope,
            filter: OrderFilter::default(),
        }
    }

    /// Evaluate against a single order (used by in-memory backends).
    pub fn matches(&self, order: &Order) -> bool {
        self.scope.permits(order) && self.filter.matches(order)
    }
}
