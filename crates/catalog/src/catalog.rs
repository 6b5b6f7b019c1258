//! Product catalog port + in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use tradelane_core::ProductId;

use crate::product::ProductSnapshot;

/// Product catalog lookup error.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown product")]
    UnknownProduct,

    #[error("product catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-side port onto the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch the ordering-relevant facts for a product.
    async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, CatalogError>;
}

#[async_trait]
impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, CatalogError> {
        (**self).get_product(id).await
    }
}

/// In-memory product catalog.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<HashMap<ProductId, ProductSnapshot>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a product snapshot.
    pub fn upsert(&self, product: ProductSnapshot) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id, product);
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, CatalogError> {
        let products = self
            .products
            .read()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".to_string()))?;

        products.get(&id).cloned().ok_or(CatalogError::UnknownProduct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ApprovalStatus;
    use tradelane_core::{Industry, UserId};

    #[tokio::test]
    async fn resolves_registered_product() {
        let catalog = InMemoryProductCatalog::new();
        let snapshot = ProductSnapshot {
            id: ProductId::new(),
            seller_id: UserId::new(),
            industry: Industry::new("beauty"),
            approval: ApprovalStatus::Approved,
        };
        catalog.upsert(snapshot.clone());

        let found = catalog.get_product(snapshot.id).await.unwrap();
        assert_eq!(found, snapshot);
    }

    #[tokio::test]
    async fn unknown_product_is_an_error() {
        let catalog = InMemoryProductCatalog::new();
        let err = catalog.get_product(ProductId::new()).await.unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProduct));
    }
}
