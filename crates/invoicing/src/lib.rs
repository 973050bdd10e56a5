//! Invoicing domain module: form validation and invoice mutations.
//!
//! Raw form data flows through [`validate`] into a typed [`InvoiceInput`], and
//! the [`MutationService`] turns that input into exactly one persistence call
//! followed by cache invalidation (and navigation, for create/edit). Storage,
//! cache and navigation are injected through the traits in [`ports`], so this
//! crate performs no IO of its own.

pub mod form;
pub mod invoice;
pub mod ports;
pub mod service;
pub mod validation;

pub use form::{FormField, FormMode, RawForm};
pub use invoice::{
    AmountCents, InvoiceChanges, InvoiceDate, InvoiceInput, InvoiceStatus, NewInvoice,
};
pub use ports::{
    Clock, InvoiceStore, LISTING_PATH, Navigator, StoreError, SystemClock, ViewInvalidator,
};
pub use service::{FormOutcome, FormState, MutationOutcome, MutationService};
pub use validation::{Rejection, ValidationReport, validate};
