//! Bearer-token validation seam.
//!
//! Token issuance and signature verification are intentionally outside this
//! system; whatever security layer is in use sits behind this trait. The
//! HTTP middleware only needs "token → user id, or a rejection".

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use tradelane_core::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("invalid or unknown token")]
    Invalid,
}

/// Validates a presented bearer token and resolves the authenticated user.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<UserId, TokenValidationError>;
}

/// Static token registry.
///
/// Dev/test stand-in for a real verifier: tokens are opaque strings mapped
/// to user ids at registration time.
#[derive(Debug, Default)]
pub struct StaticTokenValidator {
    tokens: RwLock<HashMap<String, UserId>>,
}

impl StaticTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, token: impl Into<String>, user: UserId) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
    }
}

impl TokenValidator for StaticTokenValidator {
    fn validate(&self, token: &str) -> Result<UserId, TokenValidationError> {
        let tokens = self.tokens.read().map_err(|_| TokenValidationError::Invalid)?;
        tokens.get(token).copied().ok_or(TokenValidationError::Invalid)
    }
}
