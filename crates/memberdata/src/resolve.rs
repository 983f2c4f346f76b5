//! Layered property resolution.
//!
//! # Resolution Order
//!
//! 1. Explicit override on the member record (short-circuits everything)
//! 2. Schema default, if the property is defined
//! 3. Live identity attribute, or the caller's fallback when absent
//!
//! Layers 2 and 3 are merged by truthiness rather than presence:
//!
//! | schema      | identity    | result             |
//! |-------------|-------------|--------------------|
//! | not defined | truthy      | identity value     |
//! | not defined | falsy/absent| `PropertyNotFound` |
//! | falsy       | falsy/absent| schema value       |
//! | falsy       | truthy      | identity value     |
//! | truthy      | any         | schema value       |

use roster_identity::Identity;
use roster_primitives::PropertyValue;
use roster_schema::PropertySchema;

use crate::{MemberDataError, MemberRecord, Result};

#[cfg(test)]
mod tests;

/// Resolves `name` for a record paired with its current identity.
pub fn resolve_property(
	record: &MemberRecord,
	schema: &PropertySchema,
	identity: &Identity,
	name: &str,
	fallback: Option<PropertyValue>,
) -> Result<PropertyValue> {
	if let Some(value) = record.override_value(name) {
		return Ok(value);
	}

	let schema_value = schema.lookup(name).map(|def| def.default.clone());
	let identity_value = identity.get_attribute_or(name, fallback);
	merge_layers(name, schema_value, identity_value)
}

/// Merges a schema default with an identity value.
///
/// `schema_value` is `None` when the property is not defined;
/// `identity_value` is `None` when the identity has no such attribute and no
/// fallback was given.
pub fn merge_layers(
	name: &str,
	schema_value: Option<PropertyValue>,
	identity_value: Option<PropertyValue>,
) -> Result<PropertyValue> {
	let identity_value = identity_value.filter(PropertyValue::is_truthy);

	match (schema_value, identity_value) {
		(None, Some(identity)) => Ok(identity),
		(None, None) => Err(MemberDataError::PropertyNotFound(name.to_string())),
		(Some(schema), Some(identity)) if !schema.is_truthy() => Ok(identity),
		(Some(schema), _) => Ok(schema),
	}
}
