use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicedesk_core::{CustomerId, DomainError, DomainResult, InvoiceId, ValueObject};

/// Invoice status as stored in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for InvoiceStatus {
    type Err = DomainError;

    /// Exact, case-sensitive match on the stored literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(DomainError::validation(format!(
                "unknown invoice status: {other:?}"
            ))),
        }
    }
}

impl ValueObject for InvoiceStatus {}

/// Largest cent value that an `f64` dollar amount can still represent exactly.
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_991.0;

/// Invoice amount in cents. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct AmountCents(i64);

impl AmountCents {
    /// Convert a dollar amount to cents as `round(dollars * 100)`.
    ///
    /// The positivity check runs on the dollar value first; an amount that is
    /// positive but rounds to zero cents is rejected as well.
    pub fn from_dollars(dollars: f64) -> DomainResult<Self> {
        if !dollars.is_finite() {
            return Err(DomainError::validation("amount must be a finite number"));
        }
        if dollars <= 0.0 {
            return Err(DomainError::validation("amount must be greater than zero"));
        }
        let cents = (dollars * 100.0).round();
        if cents < 1.0 {
            return Err(DomainError::validation("amount is less than one cent"));
        }
        if cents > MAX_EXACT_CENTS {
            return Err(DomainError::validation("amount is too large"));
        }
        Ok(Self(cents as i64))
    }

    pub fn from_cents(cents: i64) -> DomainResult<Self> {
        if cents <= 0 {
            return Err(DomainError::validation("amount must be greater than zero"));
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for AmountCents {
    type Error = DomainError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::from_cents(cents)
    }
}

impl ValueObject for AmountCents {}

/// Calendar date of invoice creation, stored as `YYYY-MM-DD` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceDate(NaiveDate);

impl InvoiceDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl core::fmt::Display for InvoiceDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl ValueObject for InvoiceDate {}

/// A validated invoice form submission.
///
/// Only the validator constructs this, so holding one means every field passed
/// its checks. There is no date: create stamps it onto the [`NewInvoice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceInput {
    id: Option<InvoiceId>,
    customer_id: CustomerId,
    amount: AmountCents,
    status: InvoiceStatus,
}

impl InvoiceInput {
    pub(crate) fn new(
        id: Option<InvoiceId>,
        customer_id: CustomerId,
        amount: AmountCents,
        status: InvoiceStatus,
    ) -> Self {
        Self {
            id,
            customer_id,
            amount,
            status,
        }
    }

    pub fn id(&self) -> Option<&InvoiceId> {
        self.id.as_ref()
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn amount(&self) -> AmountCents {
        self.amount
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Insert payload, stamped with the creation date.
    pub fn into_new_invoice(self, date: InvoiceDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date,
        }
    }

    /// Update payload plus the row key. The date is never part of an update.
    pub fn into_changes(self) -> (Option<InvoiceId>, InvoiceChanges) {
        (
            self.id,
            InvoiceChanges {
                customer_id: self.customer_id,
                amount: self.amount,
                status: self.status,
            },
        )
    }
}

/// Row values for `insert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewInvoice {
    pub customer_id: CustomerId,
    pub amount: AmountCents,
    pub status: InvoiceStatus,
    pub date: InvoiceDate,
}

/// Row values for `update-by-id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceChanges {
    pub customer_id: CustomerId,
    pub amount: AmountCents,
    pub status: InvoiceStatus,
}
