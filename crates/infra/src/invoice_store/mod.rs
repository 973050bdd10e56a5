//! Implementations of the `InvoiceStore` port.
//!
//! Both stores write to the same logical `invoices` relation:
//! `id, customer_id, amount (integer cents), status (text), date (text, YYYY-MM-DD)`.

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryInvoiceStore, InvoiceRecord};
pub use postgres::PostgresInvoiceStore;
