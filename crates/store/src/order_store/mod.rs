mod in_memory;
mod postgres;
mod query;
mod r#trait;

pub use in_memory::InMemoryOrderStore;
pub use postgres::PgOrderStore;
pub use query::OrderQuery;
pub use r#trait::{OrderStore, StoreError};
