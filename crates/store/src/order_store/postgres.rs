//! Postgres-backed order store.
//!
//! The compare-and-swap lives in the database: `UPDATE … WHERE id = $1 AND
//! status = $2` only touches the row when the status still matches what the
//! caller read, so two conflicting transitions can never both commit.
//!
//! ## Error Mapping
//!
//! | SQLx error | Postgres code | StoreError | Scenario |
//! |------------|---------------|------------|----------|
//! | Database (unique violation) | `23505` | `AlreadyExists` | Duplicate order id on insert |
//! | Database (other) | any other | `Backend` | Constraint/connection failures |
//! | Decode / corrupt column | n/a | `Backend` | Row does not deserialize |
//! | Zero rows on conditional update | n/a | `NotFound` / `Concurrency` | Disambiguated by a follow-up status read |

use serde_json::Value as JsonValue;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};
use tracing::instrument;

use async_trait::async_trait;

use tradelane_core::{DomainError, Industry, OrderId, ProductId, UserId};
use tradelane_orders::{FulfillmentDetails, Order, OrderStatus, StatusUpdate};

use super::query::OrderQuery;
use super::r#trait::{OrderStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    id                  UUID PRIMARY KEY,
    buyer_id            UUID NOT NULL,
    product_id          UUID NOT NULL,
    seller_id           UUID NOT NULL,
    industry            TEXT NOT NULL,
    quantity            BIGINT NOT NULL CHECK (quantity >= 1),
    shipping_address    TEXT NOT NULL,
    status              TEXT NOT NULL,
    fulfillment_details JSONB,
    admin_notes         TEXT,
    created_at          TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS orders_buyer_id_idx ON orders (buyer_id);
CREATE INDEX IF NOT EXISTS orders_seller_id_idx ON orders (seller_id);
CREATE INDEX IF NOT EXISTS orders_industry_idx ON orders (industry);
CREATE INDEX IF NOT EXISTS orders_status_idx ON orders (status);
"#;

const SELECT_COLUMNS: &str = "id, buyer_id, product_id, seller_id, industry, quantity, \
     shipping_address, status, fulfillment_details, admin_notes, created_at";

/// Postgres-backed order store.
///
/// Uses the SQLx connection pool (thread-safe, `Send + Sync`); all queries
/// are runtime-checked, and visibility scoping happens per query via
/// `OrderQuery`.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Backend(format!("connect: {e}")))?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the orders table and its indexes when missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("ensure_schema: {e}")))?;
        Ok(())
    }
}

fn map_sqlx_error(op: &str, e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            return StoreError::AlreadyExists;
        }
    }
    StoreError::Backend(format!("{op}: {e}"))
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    let column = |e: sqlx::Error| StoreError::Backend(format!("decode: {e}"));

    let status_raw: String = row.try_get("status").map_err(column)?;
    let status: OrderStatus = status_raw
        .parse()
        .map_err(|e: DomainError| StoreError::Backend(format!("corrupt status column: {e}")))?;

    let details_raw: Option<JsonValue> = row.try_get("fulfillment_details").map_err(column)?;
    let fulfillment_details = details_raw
        .map(FulfillmentDetails::parse)
        .transpose()
        .map_err(|e| StoreError::Backend(format!("corrupt fulfillment_details column: {e}")))?;

    let industry: String = row.try_get("industry").map_err(column)?;

    Ok(Order {
        id: OrderId::from_uuid(row.try_get("id").map_err(column)?),
        buyer_id: UserId::from_uuid(row.try_get("buyer_id").map_err(column)?),
        product_id: ProductId::from_uuid(row.try_get("product_id").map_err(column)?),
        seller_id: UserId::from_uuid(row.try_get("seller_id").map_err(column)?),
        industry: Industry::new(industry),
        quantity: row.try_get("quantity").map_err(column)?,
        shipping_address: row.try_get("shipping_address").map_err(column)?,
        status,
        fulfillment_details,
        admin_notes: row.try_get("admin_notes").map_err(column)?,
        created_at: row.try_get("created_at").map_err(column)?,
    })
}

#[async_trait]
impl OrderStore for PgOrderStore {
    #[instrument(skip(self, order), fields(order_id = %order.id), err)]
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, buyer_id, product_id, seller_id, industry, quantity,
                shipping_address, status, fulfillment_details, admin_notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.buyer_id.as_uuid())
        .bind(order.product_id.as_uuid())
        .bind(order.seller_id.as_uuid())
        .bind(order.industry.as_str())
        .bind(order.quantity)
        .bind(&order.shipping_address)
        .bind(order.status.as_str())
        .bind(
            order
                .fulfillment_details
                .as_ref()
                .map(|d| d.as_json().clone()),
        )
        .bind(&order.admin_notes)
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(order_id = %id), err)]
    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(order_from_row).transpose()
    }

    #[instrument(skip(self, query), err)]
    async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, StoreError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE TRUE"
        ));

        // Visibility scope first; the caller filter can only narrow it.
        let scope = &query.scope;
        if let Some(buyer_id) = scope.buyer_id {
            builder.push(" AND buyer_id = ");
            builder.push_bind(*buyer_id.as_uuid());
        }
        if let Some(seller_id) = scope.seller_id {
            builder.push(" AND seller_id = ");
            builder.push_bind(*seller_id.as_uuid());
        }
        if let Some(industry) = &scope.industry {
            builder.push(" AND industry = ");
            builder.push_bind(industry.as_str().to_string());
        }
        if let Some(statuses) = scope.statuses {
            let names: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
            builder.push(" AND status = ANY(");
            builder.push_bind(names);
            builder.push(")");
        }

        let filter = &query.filter;
        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str().to_string());
        }
        if let Some(seller_id) = filter.seller_id {
            builder.push(" AND seller_id = ");
            builder.push_bind(*seller_id.as_uuid());
        }
        if let Some(buyer_id) = filter.buyer_id {
            builder.push(" AND buyer_id = ");
            builder.push_bind(*buyer_id.as_uuid());
        }

        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(order_from_row).collect()
    }

    #[instrument(skip(self, update), fields(order_id = %id, expected = %expected), err)]
    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        update: StatusUpdate,
    ) -> Result<Order, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE orders
            SET status = $3,
                fulfillment_details = COALESCE($4, fulfillment_details),
                admin_notes = COALESCE($5, admin_notes)
            WHERE id = $1 AND status = $2
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(update.status.as_str())
        .bind(
            update
                .fulfillment_details
                .as_ref()
                .map(|d| d.as_json().clone()),
        )
        .bind(&update.admin_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_status", e))?;

        if let Some(row) = row {
            return order_from_row(&row);
        }

        // Zero rows: either the order is gone or another transition won.
        let found: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_status", e))?;

        match found {
            None => Err(StoreError::NotFound),
            Some(raw) => {
                let found = raw.parse().map_err(|e: DomainError| {
                    StoreError::Backend(format!("corrupt status column: {e}"))
                })?;
                Err(StoreError::Concurrency { expected, found })
            }
        }
    }
}
