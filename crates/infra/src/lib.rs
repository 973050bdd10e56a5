//! Infrastructure layer: invoice storage, view cache, configuration.

pub mod config;
pub mod invoice_store;
pub mod view_cache;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use invoice_store::{InMemoryInvoiceStore, InvoiceRecord, PostgresInvoiceStore};
pub use view_cache::ViewRevisions;
