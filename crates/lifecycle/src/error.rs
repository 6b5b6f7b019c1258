//! Lifecycle error model: the domain/infrastructure split.
//!
//! Domain errors are deterministic facts the client can act on and are never
//! retried. Infrastructure errors (store, catalog or directory outages) are
//! opaque to clients; retrying is the caller's decision.

use thiserror::Error;

use tradelane_catalog::CatalogError;
use tradelane_core::DomainError;
use tradelane_directory::DirectoryError;
use tradelane_store::StoreError;

/// A collaborator failed for reasons unrelated to the request.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("order store failure: {0}")]
    Store(String),

    #[error("product catalog failure: {0}")]
    Catalog(String),

    #[error("user directory failure: {0}")]
    Directory(String),
}

/// Error surface of every lifecycle operation.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infrastructure(InfraError),
}

impl From<StoreError> for LifecycleError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => DomainError::NotFound.into(),
            StoreError::AlreadyExists => DomainError::conflict("order already exists").into(),
            StoreError::Concurrency { expected, found } => DomainError::conflict(format!(
                "order status changed concurrently (expected {expected}, found {found})"
            ))
            .into(),
            StoreError::Backend(msg) => LifecycleError::Infrastructure(InfraError::Store(msg)),
        }
    }
}

impl From<CatalogError> for LifecycleError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::UnknownProduct => DomainError::NotFound.into(),
            CatalogError::Unavailable(msg) => {
                LifecycleError::Infrastructure(InfraError::Catalog(msg))
            }
        }
    }
}

impl From<DirectoryError> for LifecycleError {
    fn from(value: DirectoryError) -> Self {
        match value {
            // An identity the directory does not know gets no further detail.
            DirectoryError::UnknownUser => DomainError::forbidden("unknown actor").into(),
            DirectoryError::Unavailable(msg) => {
                LifecycleError::Infrastructure(InfraError::Directory(msg))
            }
        }
    }
}

impl LifecycleError {
    /// Whether this is a domain rejection (as opposed to infrastructure).
    pub fn is_domain(&self) -> bool {
        matches!(self, LifecycleError::Domain(_))
    }
}
