use std::sync::Arc;

use invoicedesk_infra::{AppConfig, InMemoryInvoiceStore, PostgresInvoiceStore, ViewRevisions};
use invoicedesk_invoicing::{InvoiceStore, MutationService};

use crate::navigation::RedirectSlot;

/// Mutation service as assembled for one request.
pub type RequestMutations = MutationService<Arc<dyn InvoiceStore>, Arc<ViewRevisions>, RedirectSlot>;

/// Shared collaborators. Cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn InvoiceStore>,
    views: Arc<ViewRevisions>,
}

impl AppServices {
    pub fn new(store: Arc<dyn InvoiceStore>, views: Arc<ViewRevisions>) -> Self {
        Self { store, views }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryInvoiceStore::new()),
            Arc::new(ViewRevisions::new()),
        )
    }

    /// Postgres when `DATABASE_URL` is configured, in-memory otherwise.
    pub fn from_config(config: &AppConfig) -> Result<Self, sqlx::Error> {
        match &config.database {
            Some(db) => Ok(Self::new(
                Arc::new(PostgresInvoiceStore::connect_lazy(db)?),
                Arc::new(ViewRevisions::new()),
            )),
            None => Ok(Self::in_memory()),
        }
    }

    pub fn views(&self) -> &Arc<ViewRevisions> {
        &self.views
    }

    /// A mutation service whose navigation is captured by a fresh slot.
    pub fn mutations(&self) -> RequestMutations {
        MutationService::new(self.store.clone(), self.views.clone(), RedirectSlot::new())
    }
}
