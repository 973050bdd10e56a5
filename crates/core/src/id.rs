//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings owned by the persistence layer. The domain only
//! checks their *shape*; whether a row with that id exists is the store's concern.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest accepted customer identifier.
pub const MAX_CUSTOMER_ID_LEN: usize = 64;

/// Identifier of an invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct InvoiceId(String);

/// Identifier of the customer an invoice is billed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CustomerId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))
            }
        }
    };
}

impl_string_newtype!(InvoiceId, "InvoiceId");
impl_string_newtype!(CustomerId, "CustomerId");

impl InvoiceId {
    /// Accepts any non-blank string, kept exactly as submitted. The store
    /// decides whether it refers to a row.
    pub fn parse(s: &str) -> Result<Self, &'static str> {
        if s.trim().is_empty() {
            return Err("must not be empty");
        }
        Ok(Self(s.to_string()))
    }

    /// Create a fresh identifier for stores that assign ids themselves.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl CustomerId {
    /// Accepts 1..=64 characters of `[A-Za-z0-9_-]`, which covers UUIDs as
    /// well as short opaque keys.
    pub fn parse(s: &str) -> Result<Self, &'static str> {
        if s.is_empty() {
            return Err("must not be empty");
        }
        if s.len() > MAX_CUSTOMER_ID_LEN {
            return Err("too long");
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err("unexpected character");
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_accepts_uuid_and_short_keys() {
        assert!(CustomerId::parse("c1").is_ok());
        assert!(CustomerId::parse("3958dc9e-712f-4377-85e9-fec4b6a6442a").is_ok());
        assert!(CustomerId::parse("cust_01").is_ok());
    }

    #[test]
    fn customer_id_rejects_blank_and_odd_shapes() {
        assert!(CustomerId::parse("").is_err());
        assert!(CustomerId::parse(" c1").is_err());
        assert!(CustomerId::parse("c1; DROP TABLE invoices").is_err());
        assert!(CustomerId::parse(&"a".repeat(MAX_CUSTOMER_ID_LEN + 1)).is_err());
    }

    #[test]
    fn invoice_id_only_requires_non_blank() {
        assert_eq!(InvoiceId::parse(" 42 ").unwrap().as_str(), " 42 ");
        assert!(InvoiceId::parse("   ").is_err());
    }

    #[test]
    fn from_str_maps_to_invalid_id() {
        let err = "".parse::<CustomerId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("CustomerId")));
    }

    #[test]
    fn generated_invoice_ids_are_distinct_uuids() {
        let a = InvoiceId::generate();
        let b = InvoiceId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = CustomerId::parse("c1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c1\"");
    }

    #[test]
    fn deserialization_applies_shape_checks() {
        let id: CustomerId = serde_json::from_str("\"c1\"").unwrap();
        assert_eq!(id.as_str(), "c1");
        assert!(serde_json::from_str::<CustomerId>("\"c 1; --\"").is_err());
        assert!(serde_json::from_str::<CustomerId>("\"\"").is_err());
        assert!(serde_json::from_str::<InvoiceId>("\"  \"").is_err());
    }
}
