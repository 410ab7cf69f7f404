//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by value. They are
/// immutable once built, so a single instance can be shared freely (e.g. one
/// role value assigned to many users).
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Role { Administrator, Guest }
///
/// impl ValueObject for Role {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
