//! Weakly-typed form input, as submitted by the invoice create/edit forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat mapping of field name to submitted text.
///
/// Form-encoded semantics: a field that was not submitted is *absent*, which is
/// distinct from a field submitted as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawForm(BTreeMap<String, String>);

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a field, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = RawForm::new();
        for (k, v) in iter {
            form.insert(k, v);
        }
        form
    }
}

/// Which form is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Edit additionally requires the `id` field.
    Edit,
}

/// Fields that can carry validation errors.
///
/// `date` is deliberately absent: it is assigned on create, never read from
/// the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormField {
    #[serde(rename = "customerId")]
    CustomerId,
    #[serde(rename = "amount")]
    Amount,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "id")]
    Id,
}

impl FormField {
    /// Key under which the field is submitted.
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::CustomerId => "customerId",
            FormField::Amount => "amount",
            FormField::Status => "status",
            FormField::Id => "id",
        }
    }
}

impl core::fmt::Display for FormField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_are_distinct() {
        let form = RawForm::new().with("customerId", "");
        assert_eq!(form.get("customerId"), Some(""));
        assert_eq!(form.get("amount"), None);
    }

    #[test]
    fn later_values_replace_earlier_ones() {
        let form: RawForm = [("status", "paid"), ("status", "pending")].into_iter().collect();
        assert_eq!(form.get("status"), Some("pending"));
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn deserializes_from_flat_json_object() {
        let form: RawForm =
            serde_json::from_str(r#"{"customerId":"c1","amount":"50"}"#).unwrap();
        assert_eq!(form.get("amount"), Some("50"));
    }

    #[test]
    fn field_wire_names_match_serde_names() {
        for field in [
            FormField::CustomerId,
            FormField::Amount,
            FormField::Status,
            FormField::Id,
        ] {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }
}
