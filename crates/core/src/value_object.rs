//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An invoice amount
/// of 5000 cents equals any other amount of 5000 cents; an invoice itself is
/// identified by its `InvoiceId` instead.
///
/// To "modify" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
