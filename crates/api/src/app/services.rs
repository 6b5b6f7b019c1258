//! Dependency wiring for the API.
//!
//! The lifecycle manager composes three ports. Production deployments point
//! the store at Postgres via `DATABASE_URL`; the user directory and product
//! catalog are stand-ins until the real services are wired in, which is also
//! what the black-box tests seed.

use std::sync::Arc;

use tradelane_catalog::{InMemoryProductCatalog, ProductCatalog};
use tradelane_directory::{InMemoryUserDirectory, StaticTokenValidator, TokenValidator, UserDirectory};
use tradelane_lifecycle::OrderLifecycle;
use tradelane_store::{InMemoryOrderStore, OrderStore, PgOrderStore, StoreError};

/// The ports the app is built from.
pub struct AppDeps {
    pub directory: Arc<dyn UserDirectory>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub store: Arc<dyn OrderStore>,
    pub tokens: Arc<dyn TokenValidator>,
}

/// Shared services handed to request handlers.
pub struct AppServices {
    pub lifecycle: OrderLifecycle,
}

impl AppServices {
    pub fn new(deps: &AppDeps) -> Self {
        Self {
            lifecycle: OrderLifecycle::new(
                deps.directory.clone(),
                deps.catalog.clone(),
                deps.store.clone(),
            ),
        }
    }
}

/// Dev/test wiring: the concrete in-memory collaborators, kept alongside the
/// port bundle so callers can seed users, products and tokens.
pub struct DevDeps {
    pub deps: AppDeps,
    pub directory: Arc<InMemoryUserDirectory>,
    pub catalog: Arc<InMemoryProductCatalog>,
    pub tokens: Arc<StaticTokenValidator>,
}

fn dev_deps_with_store(store: Arc<dyn OrderStore>) -> DevDeps {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let catalog = Arc::new(InMemoryProductCatalog::new());
    let tokens = Arc::new(StaticTokenValidator::new());

    DevDeps {
        deps: AppDeps {
            directory: directory.clone(),
            catalog: catalog.clone(),
            store,
            tokens: tokens.clone(),
        },
        directory,
        catalog,
        tokens,
    }
}

/// Everything in memory (tests, local dev without a database).
pub fn in_memory_deps() -> DevDeps {
    dev_deps_with_store(Arc::new(InMemoryOrderStore::new()))
}

/// Durable order storage in Postgres; collaborators stay in memory.
pub async fn postgres_deps(database_url: &str) -> Result<DevDeps, StoreError> {
    let store = PgOrderStore::connect(database_url).await?;
    Ok(dev_deps_with_store(Arc::new(store)))
}

/// Seed a minimal fixture set and log the bearer tokens so a fresh instance
/// is explorable without a user directory deployment.
pub fn seed_dev_fixtures(dev: &DevDeps) {
    use tradelane_catalog::{ApprovalStatus, ProductSnapshot};
    use tradelane_core::{Industry, ProductId, UserId};
    use tradelane_directory::{Actor, Role};

    let admin = UserId::new();
    let buyer = UserId::new();
    let seller = UserId::new();
    let product = ProductId::new();

    dev.directory.upsert(Actor::new(admin, Role::Admin));
    dev.directory.upsert(Actor::new(buyer, Role::Buyer));
    dev.directory.upsert(Actor::with_industry(
        seller,
        Role::Seller,
        Industry::new("electronics"),
    ));
    dev.catalog.upsert(ProductSnapshot {
        id: product,
        seller_id: seller,
        industry: Industry::new("electronics"),
        approval: ApprovalStatus::Approved,
    });

    dev.tokens.register("dev-admin", admin);
    dev.tokens.register("dev-buyer", buyer);
    dev.tokens.register("dev-seller", seller);

    tracing::info!(
        %admin, %buyer, %seller, %product,
        "seeded dev fixtures; bearer tokens: dev-admin, dev-buyer, dev-seller"
    );
}
