//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object has no identity of its own; two instances with the same
/// attribute values are interchangeable. They are immutable — "changing" one
/// means constructing a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Weight(i32); // tenths of a unit
///
/// impl ValueObject for Weight {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
