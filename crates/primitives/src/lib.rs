//! Core types for member data: identity keys, property types, and values.

/// Opaque identity keys.
pub mod key;
/// Property value carriers and their declared types.
pub mod value;

pub use key::IdentityKey;
pub use value::{PropertyType, PropertyValue};
