//! Standard member properties.

use roster_primitives::PropertyType;

use crate::PropertySchema;

/// Default for date properties that have never been recorded.
pub const EPOCH_DATE: &str = "2000/01/01";

/// Name, type, and raw default of every standard member property.
pub const STANDARD_PROPERTIES: &[(&str, PropertyType, &str)] = &[
	("email", PropertyType::String, ""),
	("portal_skin", PropertyType::String, ""),
	("listed", PropertyType::Boolean, ""),
	("login_time", PropertyType::Date, EPOCH_DATE),
	("last_login_time", PropertyType::Date, EPOCH_DATE),
];

/// Builds a schema holding the standard member properties.
pub fn standard_schema() -> PropertySchema {
	let mut schema = PropertySchema::new();
	for &(name, ty, default) in STANDARD_PROPERTIES {
		// Raw defaults above are valid for their types.
		if let Err(err) = schema.define(name, ty, default) {
			tracing::error!(name, error = %err, "standard property rejected");
		}
	}
	schema
}

#[cfg(test)]
mod tests {
	use roster_primitives::PropertyValue;

	use super::*;

	#[test]
	fn standard_schema_defines_every_property() {
		let schema = standard_schema();
		assert_eq!(
			schema.list_names(),
			vec!["email", "portal_skin", "listed", "login_time", "last_login_time"]
		);
		assert_eq!(schema.lookup("listed").unwrap().default, PropertyValue::Bool(false));
	}
}
