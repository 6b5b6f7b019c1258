//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures (validation,
/// authorization, state-machine violations). Infrastructure concerns
/// (connectivity, storage) belong to the layers that own them and must not
/// be folded into this enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or missing input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// The actor is not allowed to perform the operation
    /// (role, ownership or industry mismatch).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A status transition not present in the transition table was requested.
    #[error("invalid status transition from {current} to {requested} for role {role}")]
    InvalidTransition {
        current: String,
        requested: String,
        role: String,
    },

    /// Stale state detected (e.g. a concurrent transition won the race).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn transition(
        current: impl ToString,
        requested: impl ToString,
        role: impl ToString,
    ) -> Self {
        Self::InvalidTransition {
            current: current.to_string(),
            requested: requested.to_string(),
            role: role.to_string(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
