//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — a conversion
/// factor or a deducted line has no identity of its own, only its values
/// matter. To "modify" a value object, create a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
