//! Invoice mutations: one persistence call, then invalidation and navigation.
//!
//! Per call the flow is strictly linear:
//! validate -> persist -> invalidate listing -> navigate (create/edit only).
//! A rejected form never reaches the store, and a failed write never reaches
//! invalidation or navigation. Nothing is retried.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use invoicedesk_core::InvoiceId;

use crate::form::{FormMode, RawForm};
use crate::invoice::{InvoiceDate, InvoiceInput};
use crate::ports::{Clock, InvoiceStore, LISTING_PATH, Navigator, SystemClock, ViewInvalidator};
use crate::validation::{ValidationReport, validate};

pub const CREATE_FAILED: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_FAILED: &str = "Database Error: Failed to update Invoice.";
pub const DELETE_FAILED: &str = "Database Error: Failed to delete Invoice.";

/// Result of a single mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum MutationOutcome {
    Success,
    /// Fixed, per-operation message. The underlying cause is only logged.
    Failure { message: String },
}

impl MutationOutcome {
    fn failure(message: &str) -> Self {
        MutationOutcome::Failure {
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Success)
    }
}

/// State handed back to the form after a rejected submission.
///
/// Callers pass the previous state into the next submission; it is accepted
/// for calling-convention compatibility and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub message: Option<String>,
    pub errors: ValidationReport,
}

/// What a form submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Validation failed; nothing was persisted.
    Rejected(FormState),
    Mutation(MutationOutcome),
}

impl FormOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Mutation(MutationOutcome::Success))
    }
}

/// Executes invoice mutations against injected collaborators.
///
/// Holds no mutable state of its own; concurrent calls are independent and
/// any row contention is left to the store.
#[derive(Debug, Clone)]
pub struct MutationService<S, V, N, C = SystemClock> {
    store: S,
    invalidator: V,
    navigator: N,
    clock: C,
}

impl<S, V, N> MutationService<S, V, N, SystemClock> {
    pub fn new(store: S, invalidator: V, navigator: N) -> Self {
        Self {
            store,
            invalidator,
            navigator,
            clock: SystemClock,
        }
    }
}

impl<S, V, N, C> MutationService<S, V, N, C> {
    /// Replace the clock used to date new invoices.
    pub fn with_clock<C2>(self, clock: C2) -> MutationService<S, V, N, C2> {
        MutationService {
            store: self.store,
            invalidator: self.invalidator,
            navigator: self.navigator,
            clock,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

impl<S, V, N, C> MutationService<S, V, N, C>
where
    S: InvoiceStore,
    V: ViewInvalidator,
    N: Navigator,
    C: Clock,
{
    /// Insert a new invoice dated today.
    #[instrument(
        skip(self, input),
        fields(customer_id = %input.customer_id(), amount_cents = input.amount().cents())
    )]
    pub async fn create(&self, input: InvoiceInput) -> MutationOutcome {
        let date = InvoiceDate::new(self.clock.today());
        let invoice = input.into_new_invoice(date);

        if let Err(e) = self.store.insert(&invoice).await {
            tracing::warn!(error = %e, "failed to create invoice");
            return MutationOutcome::failure(CREATE_FAILED);
        }

        tracing::info!(date = %date, "invoice created");
        self.invalidator.invalidate(LISTING_PATH);
        self.navigator.navigate(LISTING_PATH);
        MutationOutcome::Success
    }

    /// Update customer, amount and status of the invoice keyed by `input.id()`.
    ///
    /// An id that matches no row still counts as success: the store's affected
    /// row count is not inspected.
    #[instrument(skip(self, input), fields(invoice_id = ?input.id().map(InvoiceId::as_str)))]
    pub async fn edit(&self, input: InvoiceInput) -> MutationOutcome {
        let (id, changes) = input.into_changes();
        let Some(id) = id else {
            tracing::warn!("edit called without an invoice id");
            return MutationOutcome::failure(UPDATE_FAILED);
        };

        if let Err(e) = self.store.update_by_id(&id, &changes).await {
            tracing::warn!(error = %e, "failed to update invoice");
            return MutationOutcome::failure(UPDATE_FAILED);
        }

        tracing::info!("invoice updated");
        self.invalidator.invalidate(LISTING_PATH);
        self.navigator.navigate(LISTING_PATH);
        MutationOutcome::Success
    }

    /// Delete the invoice keyed by `id`. Invalidates the listing but does not
    /// navigate: deletes are issued from the listing itself.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn delete(&self, id: &InvoiceId) -> MutationOutcome {
        if let Err(e) = self.store.delete_by_id(id).await {
            tracing::warn!(error = %e, "failed to delete invoice");
            return MutationOutcome::failure(DELETE_FAILED);
        }

        tracing::info!("invoice deleted");
        self.invalidator.invalidate(LISTING_PATH);
        MutationOutcome::Success
    }

    /// Validate a create form and, if it passes, insert it.
    pub async fn create_from_form(
        &self,
        _previous: Option<FormState>,
        raw: &RawForm,
    ) -> FormOutcome {
        match validate(raw, FormMode::Create) {
            Ok(input) => FormOutcome::Mutation(self.create(input).await),
            Err(rejection) => FormOutcome::Rejected(FormState {
                message: Some(rejection.message),
                errors: rejection.errors,
            }),
        }
    }

    /// Validate an edit form (which must carry `id`) and, if it passes, update.
    pub async fn edit_from_form(&self, _previous: Option<FormState>, raw: &RawForm) -> FormOutcome {
        match validate(raw, FormMode::Edit) {
            Ok(input) => FormOutcome::Mutation(self.edit(input).await),
            Err(rejection) => FormOutcome::Rejected(FormState {
                message: Some(rejection.message),
                errors: rejection.errors,
            }),
        }
    }

    /// Delete by a caller-supplied id. A blank id fails without touching the store.
    pub async fn delete_by_raw_id(&self, raw_id: &str) -> MutationOutcome {
        match InvoiceId::parse(raw_id) {
            Ok(id) => self.delete(&id).await,
            Err(reason) => {
                tracing::warn!(reason, "delete called with an invalid invoice id");
                MutationOutcome::failure(DELETE_FAILED)
            }
        }
    }
}
