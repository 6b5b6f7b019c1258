use tradelane_core::UserId;

/// Authenticated actor context for a request.
///
/// Carries only the authenticated identity. Role and industry are resolved
/// through the user directory per operation; tokens never embed authority.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActorContext {
    actor_id: UserId,
}

impl ActorContext {
    pub fn new(actor_id: UserId) -> Self {
        Self { actor_id }
    }

    pub fn actor_id(&self) -> UserId {
        self.actor_id
    }
}
