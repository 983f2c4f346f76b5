use roster_primitives::{PropertyType, PropertyValue};

/// Definition of a member property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
	/// Unique property name.
	pub name: String,
	/// Declared value type; writes are coerced to it.
	pub value_type: PropertyType,
	/// Value used when neither the record nor the identity supplies one.
	pub default: PropertyValue,
}

impl PropertyDef {
	pub fn new(name: impl Into<String>, value_type: PropertyType, default: PropertyValue) -> Self {
		Self {
			name: name.into(),
			value_type,
			default,
		}
	}
}
