//! Collaborator contracts consumed by the mutation service.
//!
//! Implementations live outside this crate (Postgres, in-memory, HTTP). Keeping
//! them behind traits lets the service run in tests without any web runtime.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use thiserror::Error;

use invoicedesk_core::InvoiceId;

use crate::invoice::{InvoiceChanges, NewInvoice};

/// Logical path of the invoice listing view.
pub const LISTING_PATH: &str = "/dashboard/invoices";

/// Storage failure reported by an [`InvoiceStore`].
///
/// The mutation service logs these and replaces them with a fixed message, so
/// the categories only matter to operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A constraint (foreign key, check, uniqueness, type) rejected the write.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The store could not be reached (pool closed, timeout, connection lost).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Backend(String),
}

/// Parameterized writes against the `invoices` relation.
///
/// Each method is one statement. Updates and deletes that match no row are
/// not errors.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), StoreError>;

    async fn update_by_id(
        &self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: &InvoiceId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> InvoiceStore for Arc<S>
where
    S: InvoiceStore + ?Sized,
{
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), StoreError> {
        (**self).insert(invoice).await
    }

    async fn update_by_id(
        &self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), StoreError> {
        (**self).update_by_id(id, changes).await
    }

    async fn delete_by_id(&self, id: &InvoiceId) -> Result<(), StoreError> {
        (**self).delete_by_id(id).await
    }
}

/// Marks a rendered view as stale.
pub trait ViewInvalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}

impl<T> ViewInvalidator for Arc<T>
where
    T: ViewInvalidator + ?Sized,
{
    fn invalidate(&self, path: &str) {
        (**self).invalidate(path)
    }
}

/// Asks the calling context to move to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

impl<T> Navigator for Arc<T>
where
    T: Navigator + ?Sized,
{
    fn navigate(&self, path: &str) {
        (**self).navigate(path)
    }
}

/// Source of "today" for invoice dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock; dates are taken in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
