//! Postgres-backed invoice store.
//!
//! Expected relation (identifiers are text, matching the domain's opaque ids):
//!
//! ```sql
//! CREATE TABLE invoices (
//!     id          TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
//!     customer_id TEXT NOT NULL REFERENCES customers (id),
//!     amount      BIGINT NOT NULL CHECK (amount > 0),
//!     status      TEXT NOT NULL CHECK (status IN ('pending', 'paid')),
//!     date        TEXT NOT NULL
//! );
//! ```
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database | class `23` (e.g. `23503`, `23514`) | `Constraint` | Unknown customer, bad status, not-null |
//! | Database | `22P02`, `22003` | `Constraint` | Value does not fit the column type |
//! | Database (other) | Any other | `Backend` | Other database errors |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Unavailable` | Connectivity |
//! | Other | N/A | `Backend` | Anything else |
//!
//! Every statement binds its values; nothing is concatenated into SQL text.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::instrument;

use invoicedesk_core::InvoiceId;
use invoicedesk_invoicing::{InvoiceChanges, InvoiceStore, NewInvoice, StoreError};

use crate::config::DatabaseConfig;

/// Postgres-backed invoice store.
///
/// ## Thread Safety
///
/// Uses SQLx connection pool which is thread-safe (Arc + Send + Sync). The pool
/// owns connection lifecycle; callers never hold a connection across calls.
///
/// ## Affected Rows
///
/// `update_by_id` and `delete_by_id` do not look at the affected-row count. A
/// key that matches nothing is reported as success.
#[derive(Debug, Clone)]
pub struct PostgresInvoiceStore {
    pool: Arc<PgPool>,
}

impl PostgresInvoiceStore {
    /// Create a new PostgresInvoiceStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Build a lazily-connecting pool from configuration.
    ///
    /// Connections are opened on first use, so an unreachable database shows
    /// up as `StoreError::Unavailable` on the first mutation rather than here.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.url)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
    #[instrument(
        skip(self, invoice),
        fields(customer_id = %invoice.customer_id, date = %invoice.date),
        err
    )]
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(invoice.customer_id.as_str())
        .bind(invoice.amount.cents())
        .bind(invoice.status.as_str())
        .bind(invoice.date.to_string())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(())
    }

    #[instrument(skip(self, changes), fields(invoice_id = %id), err)]
    async fn update_by_id(
        &self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $1, amount = $2, status = $3
            WHERE id = $4
            "#,
        )
        .bind(changes.customer_id.as_str())
        .bind(changes.amount.cents())
        .bind(changes.status.as_str())
        .bind(id.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_by_id", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    async fn delete_by_id(&self, id: &InvoiceId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                Some(code) if is_constraint_code(code.as_ref()) => StoreError::Constraint(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring connection in {}", operation))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {}: {}", operation, e)),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {}: {}", operation, e)),
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

/// Integrity violations (class 23) and values the column type cannot hold.
fn is_constraint_code(code: &str) -> bool {
    code.starts_with("23") || code == "22P02" || code == "22003"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_codes_are_constraint_violations() {
        assert!(is_constraint_code("23503"));
        assert!(is_constraint_code("23514"));
        assert!(is_constraint_code("22P02"));
        assert!(!is_constraint_code("42P01"));
        assert!(!is_constraint_code("08006"));
    }

    #[test]
    fn connectivity_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx_error("insert", sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("insert", sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("delete_by_id", sqlx::Error::RowNotFound),
            StoreError::Backend(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_database_surfaces_as_unavailable() {
        let config = DatabaseConfig {
            url: "postgres://invoicedesk@127.0.0.1:1/invoicedesk".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        };
        let store = PostgresInvoiceStore::connect_lazy(&config).unwrap();
        let err = store
            .delete_by_id(&InvoiceId::parse("inv-1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }
}
