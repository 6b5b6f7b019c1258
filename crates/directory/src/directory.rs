//! User directory port + in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use tradelane_core::UserId;

use crate::actor::Actor;

/// User directory lookup error.
///
/// `UnknownUser` is an authorization-relevant fact (the caller presented an
/// identity the directory does not know); `Unavailable` is infrastructure.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("unknown user")]
    UnknownUser,

    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-side port onto the user directory.
///
/// The directory is an external collaborator; implementations may be backed
/// by a database, a remote identity service, or (for dev/tests) memory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user id to its role and industry affiliation.
    async fn get_actor(&self, id: UserId) -> Result<Actor, DirectoryError>;
}

#[async_trait]
impl<S> UserDirectory for Arc<S>
where
    S: UserDirectory + ?Sized,
{
    async fn get_actor(&self, id: UserId) -> Result<Actor, DirectoryError> {
        (**self).get_actor(id).await
    }
}

/// In-memory user directory.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    actors: RwLock<HashMap<UserId, Actor>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an actor.
    pub fn upsert(&self, actor: Actor) {
        if let Ok(mut actors) = self.actors.write() {
            actors.insert(actor.id, actor);
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_actor(&self, id: UserId) -> Result<Actor, DirectoryError> {
        let actors = self
            .actors
            .read()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?;

        actors.get(&id).cloned().ok_or(DirectoryError::UnknownUser)
    }
}
