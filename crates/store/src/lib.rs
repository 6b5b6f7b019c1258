//! `tradelane-store` — the order persistence layer.
//!
//! Durable order storage behind the `OrderStore` port, queried/updated
//! one logical operation per request. Status transitions go through a
//! compare-and-swap so concurrent transitions can never both win.

pub mod order_store;

pub use order_store::{
    InMemoryOrderStore, OrderQuery, OrderStore, PgOrderStore, StoreError,
};
