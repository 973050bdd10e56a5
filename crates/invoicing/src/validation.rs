//! Form validation: raw field map in, typed [`InvoiceInput`] or per-field report out.
//!
//! Every field is checked on every call. A submission with three bad fields
//! yields three report entries, so the form can show all problems at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use invoicedesk_core::{CustomerId, InvoiceId};

use crate::form::{FormField, FormMode, RawForm};
use crate::invoice::{AmountCents, InvoiceInput, InvoiceStatus};

pub const INVALID_INPUT: &str = "Invalid input";
pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select a valid invoice status.";
pub const ID_MESSAGE: &str = "Missing invoice id.";

/// Field name to the ordered error messages for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport(BTreeMap<FormField, Vec<String>>);

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn messages(&self, field: FormField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

/// A submission that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
    pub message: String,
    pub errors: ValidationReport,
}

impl Rejection {
    fn new(errors: ValidationReport) -> Self {
        Self {
            message: INVALID_INPUT.to_string(),
            errors,
        }
    }
}

/// Parse and constraint-check a raw invoice form.
///
/// Pure: no IO, no clock. `date` is never read from `raw`.
pub fn validate(raw: &RawForm, mode: FormMode) -> Result<InvoiceInput, Rejection> {
    let mut report = ValidationReport::new();

    let customer_id = check(&mut report, FormField::CustomerId, CUSTOMER_MESSAGE, || {
        raw.get("customerId").and_then(|s| CustomerId::parse(s).ok())
    });
    let amount = check(&mut report, FormField::Amount, AMOUNT_MESSAGE, || {
        raw.get("amount").and_then(parse_amount)
    });
    let status = check(&mut report, FormField::Status, STATUS_MESSAGE, || {
        raw.get("status").and_then(|s| s.parse::<InvoiceStatus>().ok())
    });
    let id = match mode {
        FormMode::Create => None,
        FormMode::Edit => check(&mut report, FormField::Id, ID_MESSAGE, || {
            raw.get("id").and_then(|s| InvoiceId::parse(s).ok())
        }),
    };

    match (customer_id, amount, status) {
        (Some(customer_id), Some(amount), Some(status)) if report.is_empty() => {
            Ok(InvoiceInput::new(id, customer_id, amount, status))
        }
        _ => {
            tracing::debug!(
                fields = ?report.fields().map(FormField::as_str).collect::<Vec<_>>(),
                "invoice form rejected"
            );
            Err(Rejection::new(report))
        }
    }
}

fn check<T>(
    report: &mut ValidationReport,
    field: FormField,
    message: &str,
    parse: impl FnOnce() -> Option<T>,
) -> Option<T> {
    let parsed = parse();
    if parsed.is_none() {
        report.push(field, message);
    }
    parsed
}

/// Decimal dollars (`"12.34"`, `"100"`, `" 5 "`) to positive cents.
fn parse_amount(text: &str) -> Option<AmountCents> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let dollars = text.parse::<f64>().ok()?;
    AmountCents::from_dollars(dollars).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(customer: &str, amount: &str, status: &str) -> RawForm {
        RawForm::new()
            .with("customerId", customer)
            .with("amount", amount)
            .with("status", status)
    }

    #[test]
    fn valid_create_form_produces_input_without_id() {
        let input = validate(&form("c1", "50", "pending"), FormMode::Create).unwrap();
        assert_eq!(input.customer_id().as_str(), "c1");
        assert_eq!(input.amount().cents(), 5000);
        assert_eq!(input.status(), InvoiceStatus::Pending);
        assert!(input.id().is_none());
    }

    #[test]
    fn amount_text_round_trips_to_cents() {
        let cents = |amount: &str| {
            validate(&form("c1", amount, "paid"), FormMode::Create)
                .unwrap()
                .amount()
                .cents()
        };
        assert_eq!(cents("12.34"), 1234);
        assert_eq!(cents("100"), 10_000);
        assert_eq!(cents(" 7.5 "), 750);
    }

    #[test]
    fn all_field_failures_are_collected_in_one_pass() {
        let rejection = validate(&form("", "0", "bad"), FormMode::Create).unwrap_err();
        assert_eq!(rejection.message, INVALID_INPUT);
        assert_eq!(rejection.errors.len(), 3);
        assert_eq!(rejection.errors.messages(FormField::CustomerId), [CUSTOMER_MESSAGE]);
        assert_eq!(rejection.errors.messages(FormField::Amount), [AMOUNT_MESSAGE]);
        assert_eq!(rejection.errors.messages(FormField::Status), [STATUS_MESSAGE]);
    }

    #[test]
    fn negative_amount_and_unknown_status_are_rejected_together() {
        let rejection = validate(&form("", "-5", "x"), FormMode::Create).unwrap_err();
        let fields: Vec<_> = rejection.errors.fields().collect();
        assert_eq!(
            fields,
            [FormField::CustomerId, FormField::Amount, FormField::Status]
        );
    }

    #[test]
    fn missing_fields_are_reported() {
        let rejection = validate(&RawForm::new(), FormMode::Create).unwrap_err();
        assert!(rejection.errors.contains(FormField::CustomerId));
        assert!(rejection.errors.contains(FormField::Amount));
        assert!(rejection.errors.contains(FormField::Status));
        assert!(!rejection.errors.contains(FormField::Id));
    }

    #[test]
    fn edit_requires_id() {
        let rejection = validate(&form("c1", "10", "paid"), FormMode::Edit).unwrap_err();
        assert_eq!(rejection.errors.messages(FormField::Id), [ID_MESSAGE]);
        assert_eq!(rejection.errors.len(), 1);

        let blank = form("c1", "10", "paid").with("id", "  ");
        assert!(validate(&blank, FormMode::Edit).is_err());

        let input = validate(&form("c1", "10", "paid").with("id", "inv-9"), FormMode::Edit)
            .unwrap();
        assert_eq!(input.id().unwrap().as_str(), "inv-9");
    }

    #[test]
    fn create_ignores_submitted_id_and_date() {
        let raw = form("c1", "10", "paid")
            .with("id", "inv-9")
            .with("date", "1999-01-01");
        let input = validate(&raw, FormMode::Create).unwrap();
        assert!(input.id().is_none());
    }

    #[test]
    fn edit_id_is_kept_exactly_as_submitted() {
        let raw = form("c1", "10", "paid").with("id", " 42 ");
        let input = validate(&raw, FormMode::Edit).unwrap();
        assert_eq!(input.id().unwrap().as_str(), " 42 ");
    }

    #[test]
    fn malformed_customer_id_is_rejected() {
        let rejection =
            validate(&form("c 1", "10", "paid"), FormMode::Create).unwrap_err();
        assert_eq!(rejection.errors.messages(FormField::CustomerId), [CUSTOMER_MESSAGE]);
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        for amount in ["", "   ", "abc", "12,50", "NaN", "inf", "$5"] {
            let rejection =
                validate(&form("c1", amount, "paid"), FormMode::Create).unwrap_err();
            assert!(
                rejection.errors.contains(FormField::Amount),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn report_serializes_with_wire_field_names() {
        let rejection = validate(&form("", "1", "paid"), FormMode::Create).unwrap_err();
        let json = serde_json::to_value(&rejection.errors).unwrap();
        assert_eq!(json, serde_json::json!({ "customerId": [CUSTOMER_MESSAGE] }));
    }

    proptest! {
        #[test]
        fn non_positive_amounts_never_validate(dollars in -1.0e9f64..=0.0) {
            let rejection = validate(&form("c1", &dollars.to_string(), "paid"), FormMode::Create)
                .unwrap_err();
            prop_assert!(rejection.errors.contains(FormField::Amount));
        }

        #[test]
        fn non_numeric_amounts_never_validate(text in "[a-zA-Z#$ ]{0,12}") {
            prop_assume!(text.trim().parse::<f64>().is_err());
            let rejection = validate(&form("c1", &text, "paid"), FormMode::Create).unwrap_err();
            prop_assert!(rejection.errors.contains(FormField::Amount));
        }

        #[test]
        fn unknown_statuses_never_validate(status in "\\PC{0,10}") {
            prop_assume!(status != "pending" && status != "paid");
            let rejection = validate(&form("c1", "10", &status), FormMode::Create).unwrap_err();
            prop_assert_eq!(rejection.errors.messages(FormField::Status), [STATUS_MESSAGE]);
        }

        #[test]
        fn whole_cent_amounts_round_trip(cents in 1i64..100_000_000) {
            let text = format!("{}.{:02}", cents / 100, cents % 100);
            let input = validate(&form("c1", &text, "pending"), FormMode::Create).unwrap();
            prop_assert_eq!(input.amount().cents(), cents);
        }
    }
}
