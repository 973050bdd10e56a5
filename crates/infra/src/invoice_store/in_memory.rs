use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Serialize;

use invoicedesk_core::{CustomerId, InvoiceId};
use invoicedesk_invoicing::{
    AmountCents, InvoiceChanges, InvoiceDate, InvoiceStatus, InvoiceStore, NewInvoice, StoreError,
};

/// One stored row of the `invoices` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub amount: AmountCents,
    pub status: InvoiceStatus,
    pub date: InvoiceDate,
}

/// In-memory invoice store.
///
/// Intended for tests/dev. Mirrors the Postgres store's observable behavior:
/// ids are assigned on insert, and updates/deletes of unknown ids succeed
/// without touching anything.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    rows: RwLock<HashMap<InvoiceId, InvoiceRecord>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row with a known id.
    pub fn with_record(self, record: InvoiceRecord) -> Self {
        if let Ok(mut rows) = self.rows.write() {
            rows.insert(record.id.clone(), record);
        }
        self
    }

    pub fn get(&self, id: &InvoiceId) -> Option<InvoiceRecord> {
        let rows = self.rows.read().ok()?;
        rows.get(id).cloned()
    }

    /// All rows, ordered by id (insertion order for generated ids).
    pub fn records(&self) -> Vec<InvoiceRecord> {
        let Ok(rows) = self.rows.read() else {
            return vec![];
        };
        let mut records: Vec<_> = rows.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("in-memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| Self::poisoned())?;
        let id = InvoiceId::generate();
        rows.insert(
            id.clone(),
            InvoiceRecord {
                id,
                customer_id: invoice.customer_id.clone(),
                amount: invoice.amount,
                status: invoice.status,
                date: invoice.date,
            },
        );
        Ok(())
    }

    async fn update_by_id(
        &self,
        id: &InvoiceId,
        changes: &InvoiceChanges,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| Self::poisoned())?;
        if let Some(row) = rows.get_mut(id) {
            row.customer_id = changes.customer_id.clone();
            row.amount = changes.amount;
            row.status = changes.status;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &InvoiceId) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| Self::poisoned())?;
        rows.remove(id);
        Ok(())
    }
}
