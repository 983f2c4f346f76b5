//! Property schema registry.
//!
//! The [`PropertySchema`] is the ordered set of property definitions a member
//! record may carry. Writes are checked and coerced against it through the
//! [`coerce`] table; reads use its defaults as the middle resolution layer.

pub mod builtins;
pub mod coerce;
pub mod def;
mod error;
pub mod registry;

pub use builtins::standard_schema;
pub use coerce::{coerce_str, coerce_value};
pub use def::PropertyDef;
pub use error::{CoercionError, SchemaError};
pub use registry::PropertySchema;
pub use roster_primitives::{PropertyType, PropertyValue};
